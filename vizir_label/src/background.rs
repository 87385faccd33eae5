// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background boxes.
//!
//! A single [`BackgroundStyle`] draws one box around the whole label; a list
//! draws one box per line. The two modes never mix.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use peniko::Brush;
use vizir_label_text::{Length, TextMeasurer};

use crate::anchor::{anchor_x, anchor_y};
use crate::element::{RectElement, RectTemplate, Template};
use crate::geometry::Geometry;
use crate::line_layout::LineLayout;
use crate::style::ResolvedStyles;

/// Paint for a background box. Unset fields are left to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundStyle {
    /// Fill paint.
    pub fill: Option<Brush>,
    /// Stroke paint.
    pub stroke: Option<Brush>,
    /// Stroke width.
    pub stroke_width: Option<f64>,
    /// Opacity.
    pub opacity: Option<f64>,
    /// Corner radius.
    pub corner_radius: Option<f64>,
}

impl BackgroundStyle {
    /// Creates an unpainted style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke and its width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Rounds the corners.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }
}

/// Background styling: one block box, or one box per line.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundStyleSpec {
    /// One box around the whole label.
    Block(BackgroundStyle),
    /// One box per line; lines past the end reuse the last style.
    PerLine(Vec<BackgroundStyle>),
}

impl From<BackgroundStyle> for BackgroundStyleSpec {
    fn from(style: BackgroundStyle) -> Self {
        Self::Block(style)
    }
}

impl From<Vec<BackgroundStyle>> for BackgroundStyleSpec {
    fn from(styles: Vec<BackgroundStyle>) -> Self {
        Self::PerLine(styles)
    }
}

/// Laid-out background boxes.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// One box around the whole label.
    Block(RectElement),
    /// One box per line, in line order.
    PerLine(Vec<RectElement>),
}

impl Background {
    /// The boxes, in drawing order.
    pub fn elements(&self) -> &[RectElement] {
        match self {
            Self::Block(rect) => core::slice::from_ref(rect),
            Self::PerLine(rects) => rects,
        }
    }

    /// Lays out the boxes for `spec`.
    pub(crate) fn compute(
        spec: &BackgroundStyleSpec,
        lines: &[String],
        styles: &ResolvedStyles,
        geometry: &Geometry,
        layout: &LineLayout,
        measurer: &dyn TextMeasurer,
        template: &RectTemplate,
    ) -> Self {
        match spec {
            BackgroundStyleSpec::Block(style) => {
                let rect = block_rect(lines, styles, geometry, layout, measurer);
                Self::Block(template.apply(RectElement {
                    key: None,
                    rect,
                    style: style.clone(),
                    class_name: None,
                    transform: geometry.transform.clone(),
                }))
            }
            BackgroundStyleSpec::PerLine(list) => Self::PerLine(
                line_rects(styles, geometry, layout)
                    .into_iter()
                    .enumerate()
                    .map(|(i, rect)| {
                        let style = list.get(i).or(list.last()).cloned().unwrap_or_default();
                        template.apply(RectElement {
                            key: Some(format!("bgKey-{i}")),
                            rect,
                            style,
                            class_name: None,
                            transform: geometry.transform.clone(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

/// Size of the text block, before padding.
pub fn block_size(
    lines: &[String],
    styles: &ResolvedStyles,
    geometry: &Geometry,
    layout: &LineLayout,
    measurer: &dyn TextMeasurer,
) -> Size {
    let metrics = layout.lines();
    let max_font_size = metrics.iter().map(|l| l.font_size).fold(0.0, f64::max);
    let cap_height_px = measurer.convert_length(Length::em(geometry.cap_height), max_font_size);
    if geometry.inline {
        let joined = lines.join(" ");
        let width = measurer.measure(&joined, &styles.first().text_style()).width
            + geometry.dx * metrics.len() as f64;
        let height = metrics.iter().map(|l| l.total_height).fold(0.0, f64::max) + cap_height_px;
        Size::new(width, height)
    } else {
        let width = metrics.iter().map(|l| l.size.width).fold(0.0, f64::max) + geometry.dx;
        let height = metrics.iter().map(|l| l.total_height).sum::<f64>() + cap_height_px;
        Size::new(width, height)
    }
}

fn block_rect(
    lines: &[String],
    styles: &ResolvedStyles,
    geometry: &Geometry,
    layout: &LineLayout,
    measurer: &dyn TextMeasurer,
) -> Rect {
    let size = block_size(lines, styles, geometry, layout, measurer);
    let pos = geometry.position;
    let x = anchor_x(geometry.direction, geometry.text_anchor, pos.x, size.width);
    let y = anchor_y(
        geometry.vertical_anchor,
        geometry.inline,
        pos.y,
        geometry.dy_offset,
        size.height,
    );
    let padding = geometry.padding.block();
    Rect::from_origin_size(
        (x, y),
        (size.width + padding.horizontal(), size.height + padding.vertical()),
    )
}

/// One box per line. Stacked boxes are anchored on their own width; inline
/// boxes are laid out left to right from the anchored row, each `dx` past the
/// previous one, matching how inline runs advance.
fn line_rects(styles: &ResolvedStyles, geometry: &Geometry, layout: &LineLayout) -> Vec<Rect> {
    let pos = geometry.position;
    let tops = layout.box_tops(pos.y);
    let metrics = layout.lines();
    let row_width: f64 = metrics
        .iter()
        .map(|l| l.size.width + l.padding.horizontal() + geometry.dx)
        .sum();
    let mut cursor = anchor_x(geometry.direction, geometry.text_anchor, pos.x, row_width);
    metrics
        .iter()
        .zip(tops)
        .enumerate()
        .map(|(i, (line, top))| {
            let width = line.size.width + line.padding.horizontal();
            let x = if geometry.inline {
                let x = cursor + geometry.dx;
                cursor = x + width;
                x
            } else {
                let anchor = styles.line(i).text_anchor.unwrap_or(geometry.text_anchor);
                anchor_x(geometry.direction, anchor, pos.x, line.size.width)
            };
            Rect::from_origin_size((x, top), (width, line.box_height()))
        })
        .collect()
}
