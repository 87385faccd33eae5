// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label specs and layout.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use vizir_label_text::TextMeasurer;

use crate::anchor::{Direction, TextAnchor, VerticalAnchor};
use crate::background::{Background, BackgroundStyleSpec};
use crate::content::{TextSpec, resolve_content};
use crate::element::{
    GroupElement, GroupTemplate, LabelDescriptor, LabelElement, LineRun, RectTemplate, Template,
    TextElement, TextTemplate, run_key,
};
use crate::geometry::{DEFAULT_CAP_HEIGHT, Geometry, LineHeight};
use crate::line_layout::LineLayout;
use crate::padding::PaddingSpec;
use crate::position::{Datum, LabelPlacement, LabelScales, project};
use crate::style::{ResolvedStyles, StyleSpec};
use crate::transform::Transform;
use crate::value::{Dynamic, LabelContext};
use crate::warning::{TracingWarnings, WarningSink};

/// Element id used when a label has none.
pub const DEFAULT_LABEL_ID: &str = "label";

/// A label as authored.
///
/// Build one with [`LabelSpec::new`] and the `with_*` methods, then call
/// [`LabelSpec::layout`].
#[derive(Clone, Debug)]
pub struct LabelSpec {
    /// Text content. `None` renders nothing.
    pub text: Option<TextSpec>,
    /// Text style(s).
    pub style: StyleSpec,
    /// Explicit anchor x; overrides the datum projection.
    pub x: Option<f64>,
    /// Explicit anchor y; overrides the datum projection.
    pub y: Option<f64>,
    /// The datum this label describes.
    pub datum: Option<Datum>,
    /// Index of the datum within its series.
    pub index: Option<usize>,
    /// Scales the datum is projected through.
    pub scales: Option<LabelScales>,
    /// Whether the datum is in polar coordinates.
    pub polar: bool,
    /// Polar origin.
    pub origin: Point,
    /// Orientation of polar labels.
    pub label_placement: LabelPlacement,
    /// Horizontal anchor.
    pub text_anchor: Option<Dynamic<TextAnchor>>,
    /// Vertical anchor.
    pub vertical_anchor: Option<Dynamic<VerticalAnchor>>,
    /// Text direction.
    pub direction: Option<Dynamic<Direction>>,
    /// Rotation in degrees.
    pub angle: Option<Dynamic<f64>>,
    /// Transform applied before rotation.
    pub transform: Option<Dynamic<Transform>>,
    /// Line height multiplier(s).
    pub line_height: LineHeight,
    /// Cap height as a fraction of the font size.
    pub cap_height: Dynamic<f64>,
    /// Lay lines out side by side.
    pub inline: bool,
    /// Horizontal offset.
    pub dx: Option<Dynamic<f64>>,
    /// Vertical offset.
    pub dy: Option<Dynamic<f64>>,
    /// Background style(s); `None` draws no background.
    pub background_style: Option<BackgroundStyleSpec>,
    /// Background padding.
    pub background_padding: Option<PaddingSpec>,
    /// Element id.
    pub id: Option<Dynamic<String>>,
    /// CSS class of the text element.
    pub class_name: Option<String>,
    /// Accessible title.
    pub title: Option<String>,
    /// Accessible description.
    pub desc: Option<Dynamic<String>>,
    /// Tab order.
    pub tab_index: Option<Dynamic<i32>>,
    /// Render out of flow.
    pub render_in_portal: bool,
    /// Caller props for background boxes.
    pub background_template: RectTemplate,
    /// Caller props for the text element.
    pub text_template: TextTemplate,
    /// Caller props for the background group.
    pub group_template: GroupTemplate,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            text: None,
            style: StyleSpec::default(),
            x: None,
            y: None,
            datum: None,
            index: None,
            scales: None,
            polar: false,
            origin: Point::ORIGIN,
            label_placement: LabelPlacement::default(),
            text_anchor: None,
            vertical_anchor: None,
            direction: None,
            angle: None,
            transform: None,
            line_height: LineHeight::default(),
            cap_height: DEFAULT_CAP_HEIGHT.into(),
            inline: false,
            dx: None,
            dy: None,
            background_style: None,
            background_padding: None,
            id: None,
            class_name: None,
            title: None,
            desc: None,
            tab_index: None,
            render_in_portal: false,
            background_template: RectTemplate::default(),
            text_template: TextTemplate::default(),
            group_template: GroupTemplate::default(),
        }
    }
}

impl LabelSpec {
    /// Creates a label showing `text`.
    pub fn new(text: impl Into<TextSpec>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the style, or one style per line.
    pub fn with_style(mut self, style: impl Into<StyleSpec>) -> Self {
        self.style = style.into();
        self
    }

    /// Sets an explicit anchor point.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Attaches the label to a datum.
    pub fn with_datum(mut self, datum: Datum) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Sets the datum's index within its series.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Projects the datum through `scales`.
    pub fn with_scales(mut self, scales: LabelScales) -> Self {
        self.scales = Some(scales);
        self
    }

    /// Treats the datum as polar, measured from `origin`.
    pub fn with_polar(mut self, origin: Point, placement: LabelPlacement) -> Self {
        self.polar = true;
        self.origin = origin;
        self.label_placement = placement;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_text_anchor(mut self, anchor: impl Into<Dynamic<TextAnchor>>) -> Self {
        self.text_anchor = Some(anchor.into());
        self
    }

    /// Sets the vertical anchor.
    pub fn with_vertical_anchor(mut self, anchor: impl Into<Dynamic<VerticalAnchor>>) -> Self {
        self.vertical_anchor = Some(anchor.into());
        self
    }

    /// Sets the text direction.
    pub fn with_direction(mut self, direction: impl Into<Dynamic<Direction>>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: impl Into<Dynamic<f64>>) -> Self {
        self.angle = Some(angle.into());
        self
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: impl Into<Dynamic<Transform>>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Sets the line height multiplier(s).
    pub fn with_line_height(mut self, line_height: impl Into<LineHeight>) -> Self {
        self.line_height = line_height.into();
        self
    }

    /// Sets the cap height as a fraction of the font size.
    pub fn with_cap_height(mut self, cap_height: impl Into<Dynamic<f64>>) -> Self {
        self.cap_height = cap_height.into();
        self
    }

    /// Lays lines out side by side.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Sets the horizontal offset.
    pub fn with_dx(mut self, dx: impl Into<Dynamic<f64>>) -> Self {
        self.dx = Some(dx.into());
        self
    }

    /// Sets the vertical offset.
    pub fn with_dy(mut self, dy: impl Into<Dynamic<f64>>) -> Self {
        self.dy = Some(dy.into());
        self
    }

    /// Draws a background: one style for a block box, a list for per-line boxes.
    pub fn with_background_style(mut self, style: impl Into<BackgroundStyleSpec>) -> Self {
        self.background_style = Some(style.into());
        self
    }

    /// Sets the background padding.
    pub fn with_background_padding(mut self, padding: impl Into<PaddingSpec>) -> Self {
        self.background_padding = Some(padding.into());
        self
    }

    /// Sets the element id.
    pub fn with_id(mut self, id: impl Into<Dynamic<String>>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the CSS class of the text element.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the accessible title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the accessible description.
    pub fn with_desc(mut self, desc: impl Into<Dynamic<String>>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Sets the tab order.
    pub fn with_tab_index(mut self, tab_index: impl Into<Dynamic<i32>>) -> Self {
        self.tab_index = Some(tab_index.into());
        self
    }

    /// Marks the label for out-of-flow rendering.
    pub fn with_render_in_portal(mut self, render_in_portal: bool) -> Self {
        self.render_in_portal = render_in_portal;
        self
    }

    /// Sets caller props for background boxes.
    pub fn with_background_template(mut self, template: RectTemplate) -> Self {
        self.background_template = template;
        self
    }

    /// Sets caller props for the text element.
    pub fn with_text_template(mut self, template: TextTemplate) -> Self {
        self.text_template = template;
        self
    }

    /// Sets caller props for the background group.
    pub fn with_group_template(mut self, template: GroupTemplate) -> Self {
        self.group_template = template;
        self
    }

    /// The anchor point: explicit coordinates, else the projected datum, else 0.
    pub fn anchor_point(&self) -> Point {
        let projected = self
            .datum
            .map(|d| project(d, self.scales.as_ref(), self.polar, self.origin));
        Point::new(
            self.x.or(projected.map(|p| p.x)).unwrap_or(0.0),
            self.y.or(projected.map(|p| p.y)).unwrap_or(0.0),
        )
    }

    /// Lays out the label.
    ///
    /// Returns `None` when there is no text to render. Recoverable problems,
    /// such as an unparsable font size, are reported to `warnings`.
    pub fn layout(
        &self,
        measurer: &dyn TextMeasurer,
        warnings: &dyn WarningSink,
    ) -> Option<LabelDescriptor> {
        let cx = LabelContext::new(self);
        let Some(lines) = resolve_content(self.text.as_ref(), &cx) else {
            tracing::trace!(target: "vizir_label", "label has no text; nothing to render");
            return None;
        };
        let cx = cx.with_lines(&lines);
        let styles = ResolvedStyles::resolve(&self.style, &cx, warnings);
        let geometry = Geometry::compute(self, &styles, lines.len(), &cx);
        let layout = LineLayout::compute(&lines, &styles, &geometry, measurer);

        let text = self
            .text_template
            .apply(self.text_element(&lines, &styles, &geometry, &layout, &cx));
        let root = match &self.background_style {
            None => LabelElement::Text(text),
            Some(spec) => {
                let background = Background::compute(
                    spec,
                    &lines,
                    &styles,
                    &geometry,
                    &layout,
                    measurer,
                    &self.background_template,
                );
                LabelElement::Group(self.group_template.apply(GroupElement {
                    class_name: None,
                    transform: None,
                    background,
                    text,
                }))
            }
        };
        Some(LabelDescriptor {
            root,
            render_in_portal: self.render_in_portal,
        })
    }

    /// [`layout`](Self::layout), reporting warnings through `tracing`.
    pub fn layout_traced(&self, measurer: &dyn TextMeasurer) -> Option<LabelDescriptor> {
        self.layout(measurer, &TracingWarnings)
    }

    fn text_element(
        &self,
        lines: &[String],
        styles: &ResolvedStyles,
        geometry: &Geometry,
        layout: &LineLayout,
        cx: &LabelContext<'_>,
    ) -> TextElement {
        let id = self
            .id
            .as_ref()
            .map_or_else(|| String::from(DEFAULT_LABEL_ID), |d| d.evaluate(cx));
        let runs: Vec<LineRun> = lines
            .iter()
            .zip(layout.lines())
            .enumerate()
            .map(|(i, (line, metrics))| {
                let style = styles.line(i);
                // Inline runs continue from the previous line's text, so they
                // also skip past that line's right padding.
                let trailing = i
                    .checked_sub(1)
                    .filter(|_| geometry.inline)
                    .and_then(|prev| layout.lines().get(prev))
                    .map_or(0.0, |prev| prev.padding.right);
                LineRun {
                    key: run_key(&id, i),
                    text: line.clone(),
                    x: (!geometry.inline).then_some(geometry.position.x),
                    dx: geometry.dx + metrics.padding.left + trailing,
                    dy: metrics.run_dy,
                    anchor: style.text_anchor.unwrap_or(geometry.text_anchor),
                    style: style.clone(),
                }
            })
            .collect();
        TextElement {
            id,
            class_name: self.class_name.clone(),
            title: self.title.clone(),
            desc: self.desc.as_ref().map(|d| d.evaluate(cx)),
            tab_index: self.tab_index.as_ref().map(|d| d.evaluate(cx)),
            position: geometry.position,
            direction: geometry.direction,
            transform: geometry.transform.clone(),
            runs,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use core::cell::RefCell;

    use vizir_label_text::HeuristicTextMeasurer;

    use super::*;
    use crate::position::ScaleLinear;

    #[test]
    fn explicit_coordinates_override_the_datum() {
        let spec = LabelSpec::new("a")
            .with_datum(Datum::new(2.0, 3.0))
            .with_scales(LabelScales::new(
                ScaleLinear::new((0.0, 10.0), (0.0, 100.0)),
                ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
            ));
        assert_eq!(spec.anchor_point(), Point::new(20.0, 70.0));

        let pinned = LabelSpec {
            x: Some(5.0),
            ..spec
        };
        assert_eq!(pinned.anchor_point(), Point::new(5.0, 70.0));
    }

    #[test]
    fn dynamic_id_keys_every_run() {
        let spec = LabelSpec::new("a\nb").with_id(Dynamic::func(|cx| {
            format!("point-{}", cx.index().unwrap_or(0))
        }));
        let spec = spec.with_index(3);
        let out = spec
            .layout(&HeuristicTextMeasurer, &RefCell::new(Vec::new()))
            .unwrap();
        assert_eq!(out.text().id, "point-3");
        assert_eq!(out.runs()[1].key, "point-3-key-1");
    }

    #[test]
    fn portal_flag_passes_through() {
        let out = LabelSpec::new("a")
            .with_render_in_portal(true)
            .layout_traced(&HeuristicTextMeasurer)
            .unwrap();
        assert!(out.render_in_portal);
    }
}
