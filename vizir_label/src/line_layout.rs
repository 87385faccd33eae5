// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-line metrics and vertical stacking.
//!
//! Each line contributes two offsets: the relative `dy` of its text run, and
//! the distance its background box sits below the previous one. Both are
//! floored to whole pixels so adjacent boxes tile without gaps.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use vizir_label_text::{Length, TextMeasurer, TextSize};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geometry::Geometry;
use crate::padding::Padding;
use crate::style::ResolvedStyles;

/// Measured facts about one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMetrics {
    /// Measured text size.
    pub size: TextSize,
    /// Font size in pixels.
    pub font_size: f64,
    /// Line height multiplier.
    pub line_height: f64,
    /// Cap height in pixels at this line's font size.
    pub cap_height_px: f64,
    /// `font_size * line_height`.
    pub total_height: f64,
    /// Background padding of this line.
    pub padding: Padding,
    /// Distance from the previous line's box top (or, for the first line,
    /// from the anchor `y`) to this line's box top.
    pub box_delta: f64,
    /// Relative vertical offset of this line's text run.
    pub run_dy: f64,
}

impl LineMetrics {
    /// Height of this line's background box, padding included.
    pub fn box_height(&self) -> f64 {
        self.total_height.ceil() + self.padding.vertical()
    }
}

/// Metrics for every line of a label.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    lines: Vec<LineMetrics>,
}

impl LineLayout {
    /// Measures `lines` and computes their stacking offsets.
    ///
    /// Inline lines after the first sit on the first line's row, so their
    /// offsets are zero.
    pub fn compute(
        lines: &[String],
        styles: &ResolvedStyles,
        geometry: &Geometry,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let mut out: Vec<LineMetrics> = Vec::with_capacity(lines.len());
        for (i, text) in lines.iter().enumerate() {
            let style = styles.line(i);
            let font_size = style.font_size;
            let line_height = geometry.line_heights.line(i);
            let cap_height_px = measurer.convert_length(Length::em(geometry.cap_height), font_size);
            let total_height = font_size * line_height;
            let padding = geometry.padding.line(i);
            let (box_delta, run_dy) = match out.last() {
                None => (
                    (geometry.dy - 0.5 * total_height - (font_size - cap_height_px)).floor(),
                    geometry.dy + padding.top,
                ),
                Some(_) if geometry.inline => (0.0, 0.0),
                Some(prev) => (
                    prev.total_height.floor() + prev.padding.vertical(),
                    run_delta(prev, font_size, line_height, cap_height_px),
                ),
            };
            out.push(LineMetrics {
                size: measurer.measure(text, &style.text_style()),
                font_size,
                line_height,
                cap_height_px,
                total_height,
                padding,
                box_delta,
                run_dy,
            });
        }
        Self { lines: out }
    }

    /// The per-line metrics.
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Top edge of each line's box, given the anchor `y`.
    pub fn box_tops(&self, y: f64) -> Vec<f64> {
        self.lines
            .iter()
            .scan(y, |top, line| {
                *top += line.box_delta;
                Some(*top)
            })
            .collect()
    }

    /// Distance from the first box top to the last box bottom.
    pub fn stacked_height(&self) -> f64 {
        let Some(last) = self.lines.last() else {
            return 0.0;
        };
        let gaps: f64 = self.lines.iter().skip(1).map(|l| l.box_delta).sum();
        gaps + last.box_height()
    }
}

/// Baseline-to-baseline offset from `prev` to a line with the given metrics.
fn run_delta(prev: &LineMetrics, font_size: f64, line_height: f64, cap_height_px: f64) -> f64 {
    let prev_total = prev.total_height;
    (-0.5 * prev.font_size - 0.5 * prev_total
        + prev_total
        + prev.padding.vertical()
        + 0.5 * font_size
        + 0.5 * font_size * line_height
        - 0.5 * (font_size - cap_height_px)
        + 0.5 * (prev.font_size - prev.cap_height_px))
        .floor()
}
