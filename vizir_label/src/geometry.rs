// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning facts shared by every line of a label.
//!
//! [`Geometry::compute`] resolves, once per layout, the anchor point,
//! anchors, direction, rotation, offsets, line heights, cap height and
//! padding that the line and background layouts both consume.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

use crate::anchor::{Direction, TextAnchor, VerticalAnchor};
use crate::label::LabelSpec;
use crate::padding::PaddingSpec;
use crate::position::{polar_degrees, polar_label_angle};
use crate::style::ResolvedStyles;
use crate::transform::Transform;
use crate::value::{Dynamic, LabelContext};

/// Cap height, as a fraction of the font size, used when none is given.
pub const DEFAULT_CAP_HEIGHT: f64 = 0.71;
/// Line height multiplier used when none is given.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.0;

/// Line spacing as authored: one multiplier, or one per line.
#[derive(Clone, Debug)]
pub enum LineHeight {
    /// One multiplier for every line.
    Uniform(Dynamic<f64>),
    /// One multiplier per line.
    PerLine(Vec<f64>),
}

impl Default for LineHeight {
    fn default() -> Self {
        Self::Uniform(DEFAULT_LINE_HEIGHT.into())
    }
}

impl From<f64> for LineHeight {
    fn from(value: f64) -> Self {
        Self::Uniform(value.into())
    }
}

impl From<Vec<f64>> for LineHeight {
    fn from(values: Vec<f64>) -> Self {
        Self::PerLine(values)
    }
}

impl LineHeight {
    /// Evaluates the multiplier(s).
    pub fn resolve(&self, cx: &LabelContext<'_>) -> LineHeights {
        match self {
            Self::Uniform(value) => LineHeights::Uniform(value.evaluate(cx)),
            Self::PerLine(values) => LineHeights::PerLine(values.clone()),
        }
    }
}

/// Resolved line height multipliers.
#[derive(Clone, Debug, PartialEq)]
pub enum LineHeights {
    /// One multiplier for every line.
    Uniform(f64),
    /// One multiplier per line; lines past the end reuse the last one, and an
    /// empty list means [`DEFAULT_LINE_HEIGHT`].
    PerLine(Vec<f64>),
}

impl LineHeights {
    /// The multiplier of line `index`.
    pub fn line(&self, index: usize) -> f64 {
        match self {
            Self::Uniform(value) => *value,
            Self::PerLine(values) => values
                .get(index)
                .or(values.last())
                .copied()
                .unwrap_or(DEFAULT_LINE_HEIGHT),
        }
    }

    /// The multiplier of the first line.
    pub fn first(&self) -> f64 {
        self.line(0)
    }
}

/// Offset from the anchor `y` to the first baseline.
///
/// `line_count` is the number of stacked rows (1 for inline labels); the
/// font size and line height are those of the first line.
pub fn line_offset(
    anchor: VerticalAnchor,
    dy: f64,
    cap_height: f64,
    line_height: f64,
    font_size: f64,
    line_count: usize,
) -> f64 {
    let n = line_count as f64;
    let rows = match anchor {
        VerticalAnchor::Start => 0.5,
        VerticalAnchor::Middle => 0.5 - n / 2.0,
        VerticalAnchor::End => 0.5 - n,
    };
    dy + (cap_height / 2.0 + rows * line_height) * font_size
}

/// Positioning facts shared by every line of a label.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// The anchor point.
    pub position: Point,
    /// Text direction.
    pub direction: Direction,
    /// Horizontal anchor.
    pub text_anchor: TextAnchor,
    /// Vertical anchor.
    pub vertical_anchor: VerticalAnchor,
    /// Rotation in degrees, if any.
    pub angle: Option<f64>,
    /// Combined transform (explicit transform plus rotation about the anchor).
    pub transform: Option<Transform>,
    /// Literal horizontal offset.
    pub dx: f64,
    /// Literal vertical offset.
    pub dy_offset: f64,
    /// Offset from the anchor `y` to the first baseline (includes `dy_offset`).
    pub dy: f64,
    /// Line height multipliers.
    pub line_heights: LineHeights,
    /// Cap height as a fraction of the font size.
    pub cap_height: f64,
    /// Background padding.
    pub padding: PaddingSpec,
    /// Whether lines are laid out side by side.
    pub inline: bool,
    /// Number of lines.
    pub line_count: usize,
}

impl Geometry {
    /// Resolves the shared positioning facts of `spec`.
    pub fn compute(
        spec: &LabelSpec,
        styles: &ResolvedStyles,
        line_count: usize,
        cx: &LabelContext<'_>,
    ) -> Self {
        let eval = |v: &Option<Dynamic<f64>>| v.as_ref().map(|d| d.evaluate(cx));
        let first = styles.first();

        let direction = spec
            .direction
            .as_ref()
            .map_or(Direction::Inherit, |d| d.evaluate(cx));
        let text_anchor = spec
            .text_anchor
            .as_ref()
            .map_or(TextAnchor::Start, |d| d.evaluate(cx));
        let vertical_anchor = first
            .vertical_anchor
            .or_else(|| spec.vertical_anchor.as_ref().map(|d| d.evaluate(cx)))
            .unwrap_or_default();

        let position = spec.anchor_point();
        let polar_angle = || {
            let datum = spec.datum.filter(|_| spec.polar)?;
            let degrees = polar_degrees(datum, spec.scales.as_ref());
            Some(polar_label_angle(spec.label_placement, degrees))
        };
        let angle = first
            .angle
            .or_else(|| eval(&spec.angle))
            .or_else(polar_angle);
        let base_transform = spec
            .transform
            .as_ref()
            .map(|d| d.evaluate(cx))
            .or_else(|| first.transform.clone());
        let transform = Transform::with_rotation(base_transform, angle, position);

        let line_heights = spec.line_height.resolve(cx);
        let cap_height = spec.cap_height.evaluate(cx);
        let dx = eval(&spec.dx).unwrap_or(0.0);
        let dy_offset = eval(&spec.dy).unwrap_or(0.0);
        let rows = if spec.inline { 1 } else { line_count };
        let dy = line_offset(
            vertical_anchor,
            dy_offset,
            cap_height,
            line_heights.first(),
            first.font_size,
            rows,
        );

        Self {
            position,
            direction,
            text_anchor,
            vertical_anchor,
            angle,
            transform,
            dx,
            dy_offset,
            dy,
            line_heights,
            cap_height,
            padding: spec.background_padding.clone().unwrap_or_default(),
            inline: spec.inline,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use core::cell::RefCell;
    use core::f64::consts::PI;

    use super::*;
    use crate::position::{Datum, LabelPlacement};
    use crate::style::LabelStyle;

    fn geometry(spec: &LabelSpec, line_count: usize) -> Geometry {
        let cx = LabelContext::new(spec);
        let styles = ResolvedStyles::resolve(&spec.style, &cx, &RefCell::new(Vec::new()));
        Geometry::compute(spec, &styles, line_count, &cx)
    }

    #[test]
    fn line_offset_by_vertical_anchor() {
        let start = line_offset(VerticalAnchor::Start, 0.0, 0.71, 1.0, 14.0, 3);
        let middle = line_offset(VerticalAnchor::Middle, 0.0, 0.71, 1.0, 14.0, 3);
        let end = line_offset(VerticalAnchor::End, 2.0, 0.71, 1.0, 14.0, 3);
        assert!((start - (0.355 + 0.5) * 14.0).abs() < 1e-9);
        assert!((middle - (0.355 - 1.0) * 14.0).abs() < 1e-9);
        assert!((end - (2.0 + (0.355 - 2.5) * 14.0)).abs() < 1e-9);
    }

    #[test]
    fn per_line_heights_reuse_the_last_entry() {
        let lh = LineHeights::PerLine(vec![1.0, 1.5]);
        assert_eq!(lh.line(0), 1.0);
        assert_eq!(lh.line(4), 1.5);
        assert_eq!(LineHeights::PerLine(Vec::new()).first(), DEFAULT_LINE_HEIGHT);
    }

    #[test]
    fn defaults() {
        let g = geometry(&LabelSpec::new("a"), 1);
        assert_eq!(g.position, Point::ORIGIN);
        assert_eq!(g.direction, Direction::Inherit);
        assert_eq!(g.text_anchor, TextAnchor::Start);
        assert_eq!(g.vertical_anchor, VerticalAnchor::Middle);
        assert_eq!(g.transform, None);
        assert!((g.dy - 0.355 * 14.0).abs() < 1e-9);
    }

    #[test]
    fn inline_labels_count_as_one_row() {
        let spec = LabelSpec::new("a")
            .with_inline(true)
            .with_vertical_anchor(VerticalAnchor::End);
        let g = geometry(&spec, 4);
        assert!((g.dy - (0.355 - 0.5) * 14.0).abs() < 1e-9);
    }

    #[test]
    fn style_vertical_anchor_wins() {
        let spec = LabelSpec::new("a")
            .with_vertical_anchor(VerticalAnchor::End)
            .with_style(LabelStyle::new().with_vertical_anchor(VerticalAnchor::Start));
        assert_eq!(geometry(&spec, 1).vertical_anchor, VerticalAnchor::Start);
    }

    #[test]
    fn style_angle_wins_and_rotates_about_the_anchor() {
        let spec = LabelSpec::new("a")
            .with_position(10.0, 20.0)
            .with_angle(15.0)
            .with_style(LabelStyle::new().with_angle(30.0));
        let g = geometry(&spec, 1);
        assert_eq!(g.angle, Some(30.0));
        assert_eq!(g.transform, Some(Transform::rotate_about(30.0, Point::new(10.0, 20.0))));
    }

    #[test]
    fn polar_labels_derive_their_angle() {
        let spec = LabelSpec::new("a")
            .with_datum(Datum::new(PI / 4.0, 10.0))
            .with_polar(Point::new(50.0, 50.0), LabelPlacement::Perpendicular);
        let g = geometry(&spec, 1);
        let angle = g.angle.unwrap();
        assert!((angle - 45.0).abs() < 1e-9);

        let vertical = LabelSpec::new("a")
            .with_datum(Datum::new(PI / 4.0, 10.0))
            .with_polar(Point::new(50.0, 50.0), LabelPlacement::Vertical);
        assert_eq!(geometry(&vertical, 1).transform, None);
    }
}
