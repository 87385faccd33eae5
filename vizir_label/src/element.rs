// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The descriptor tree handed to renderers, and caller templates for it.
//!
//! A template holds the props a caller wants to force on an element. Applying
//! it to a computed element keeps every computed prop the template leaves
//! unset, so explicit caller props always win.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::anchor::{Direction, TextAnchor};
use crate::background::{Background, BackgroundStyle};
use crate::style::ResolvedStyle;
use crate::transform::Transform;

/// Merges caller-set props over a computed element.
pub trait Template {
    /// The element this template applies to.
    type Element;

    /// Returns `computed` with every prop set on `self` overriding it.
    fn apply(&self, computed: Self::Element) -> Self::Element;
}

/// Key of run `index` in the text element `id`.
pub(crate) fn run_key(id: &str, index: usize) -> String {
    format!("{id}-key-{index}")
}

fn prefer<T: Clone>(explicit: &Option<T>, computed: T) -> T {
    explicit.clone().unwrap_or(computed)
}

fn prefer_opt<T: Clone>(explicit: &Option<T>, computed: Option<T>) -> Option<T> {
    explicit.clone().or(computed)
}

/// A background rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    /// Stable key (`bgKey-{i}` for per-line boxes).
    pub key: Option<String>,
    /// Box in label space.
    pub rect: Rect,
    /// Paint.
    pub style: BackgroundStyle,
    /// CSS class.
    pub class_name: Option<String>,
    /// Transform, shared with the text.
    pub transform: Option<Transform>,
}

/// Caller-set props for background rectangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RectTemplate {
    /// Left edge.
    pub x: Option<f64>,
    /// Top edge.
    pub y: Option<f64>,
    /// Width.
    pub width: Option<f64>,
    /// Height.
    pub height: Option<f64>,
    /// Paint.
    pub style: Option<BackgroundStyle>,
    /// CSS class.
    pub class_name: Option<String>,
    /// Transform.
    pub transform: Option<Transform>,
}

impl RectTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the left edge.
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Forces the top edge.
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Forces the width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Forces the height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Forces the paint.
    pub fn with_style(mut self, style: BackgroundStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the CSS class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Forces the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl Template for RectTemplate {
    type Element = RectElement;

    fn apply(&self, computed: RectElement) -> RectElement {
        let r = computed.rect;
        let origin = Point::new(prefer(&self.x, r.x0), prefer(&self.y, r.y0));
        let size = (prefer(&self.width, r.width()), prefer(&self.height, r.height()));
        RectElement {
            key: computed.key,
            rect: Rect::from_origin_size(origin, size),
            style: prefer(&self.style, computed.style),
            class_name: prefer_opt(&self.class_name, computed.class_name),
            transform: prefer_opt(&self.transform, computed.transform),
        }
    }
}

/// One line of a text element.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRun {
    /// Stable key, `{id}-key-{i}`.
    pub key: String,
    /// The line's text.
    pub text: String,
    /// Absolute x; `None` for inline runs, which continue the previous one.
    pub x: Option<f64>,
    /// Relative horizontal offset.
    pub dx: f64,
    /// Relative vertical offset from the previous run's baseline.
    pub dy: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Resolved style.
    pub style: ResolvedStyle,
}

/// A text element: one run per line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    /// Element id; also prefixes run keys.
    pub id: String,
    /// CSS class.
    pub class_name: Option<String>,
    /// Accessible title.
    pub title: Option<String>,
    /// Accessible description.
    pub desc: Option<String>,
    /// Tab order.
    pub tab_index: Option<i32>,
    /// Anchor point.
    pub position: Point,
    /// Text direction.
    pub direction: Direction,
    /// Transform.
    pub transform: Option<Transform>,
    /// The lines.
    pub runs: Vec<LineRun>,
}

/// Caller-set props for the text element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextTemplate {
    /// Element id.
    pub id: Option<String>,
    /// CSS class.
    pub class_name: Option<String>,
    /// Accessible title.
    pub title: Option<String>,
    /// Accessible description.
    pub desc: Option<String>,
    /// Tab order.
    pub tab_index: Option<i32>,
    /// Text direction.
    pub direction: Option<Direction>,
    /// Transform.
    pub transform: Option<Transform>,
}

impl TextTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the element id. Run keys follow it.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the CSS class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Forces the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Forces the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl Template for TextTemplate {
    type Element = TextElement;

    fn apply(&self, computed: TextElement) -> TextElement {
        let mut runs = computed.runs;
        if let Some(id) = &self.id {
            for (i, run) in runs.iter_mut().enumerate() {
                run.key = run_key(id, i);
            }
        }
        TextElement {
            id: prefer(&self.id, computed.id),
            class_name: prefer_opt(&self.class_name, computed.class_name),
            title: prefer_opt(&self.title, computed.title),
            desc: prefer_opt(&self.desc, computed.desc),
            tab_index: prefer_opt(&self.tab_index, computed.tab_index),
            direction: prefer(&self.direction, computed.direction),
            transform: prefer_opt(&self.transform, computed.transform),
            runs,
            ..computed
        }
    }
}

/// A group drawing a background beneath text.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupElement {
    /// CSS class.
    pub class_name: Option<String>,
    /// Transform of the whole group.
    pub transform: Option<Transform>,
    /// Background box(es), drawn first.
    pub background: Background,
    /// The text, drawn on top.
    pub text: TextElement,
}

/// Caller-set props for the group wrapping background and text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupTemplate {
    /// CSS class.
    pub class_name: Option<String>,
    /// Transform of the whole group.
    pub transform: Option<Transform>,
}

impl GroupTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSS class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

impl Template for GroupTemplate {
    type Element = GroupElement;

    fn apply(&self, computed: GroupElement) -> GroupElement {
        GroupElement {
            class_name: prefer_opt(&self.class_name, computed.class_name),
            transform: prefer_opt(&self.transform, computed.transform),
            ..computed
        }
    }
}

/// The root of a laid-out label.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelElement {
    /// Text alone.
    Text(TextElement),
    /// Background and text.
    Group(GroupElement),
}

/// A laid-out label, ready for a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDescriptor {
    /// The element tree.
    pub root: LabelElement,
    /// Whether the host should render this label out of flow.
    pub render_in_portal: bool,
}

impl LabelDescriptor {
    /// The text element.
    pub fn text(&self) -> &TextElement {
        match &self.root {
            LabelElement::Text(text) => text,
            LabelElement::Group(group) => &group.text,
        }
    }

    /// The background, if the label has one.
    pub fn background(&self) -> Option<&Background> {
        match &self.root {
            LabelElement::Text(_) => None,
            LabelElement::Group(group) => Some(&group.background),
        }
    }

    /// The text runs.
    pub fn runs(&self) -> &[LineRun] {
        &self.text().runs
    }
}
