// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-line chart label layout.
//!
//! Given a [`LabelSpec`] (text, per-line styles, anchor point, anchors,
//! rotation, line spacing, and optional background), [`LabelSpec::layout`]
//! computes a [`LabelDescriptor`]:
//! - one text element with a positioned run per line, and
//! - optionally, a background: one box around the block, or one per line.
//!
//! Text and background share the same line metrics, so boxes always line up
//! with the text they surround.
//!
//! Measurement is delegated to a [`vizir_label_text::TextMeasurer`], and
//! painting to whatever renderer consumes the descriptor.

#![no_std]

extern crate alloc;

mod anchor;
mod background;
mod content;
mod element;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod label;
#[cfg(test)]
mod label_tests;
mod line_layout;
mod padding;
mod position;
mod style;
mod transform;
mod value;
mod warning;

pub use anchor::{Direction, TextAnchor, VerticalAnchor, anchor_x, anchor_y};
pub use background::{Background, BackgroundStyle, BackgroundStyleSpec, block_size};
pub use content::{TextSpec, TextValue, resolve_content};
pub use element::{
    GroupElement, GroupTemplate, LabelDescriptor, LabelElement, LineRun, RectElement,
    RectTemplate, Template, TextElement, TextTemplate,
};
pub use geometry::{
    DEFAULT_CAP_HEIGHT, DEFAULT_LINE_HEIGHT, Geometry, LineHeight, LineHeights, line_offset,
};
pub use label::{DEFAULT_LABEL_ID, LabelSpec};
pub use line_layout::{LineLayout, LineMetrics};
pub use padding::{Padding, PaddingSides, PaddingSpec};
pub use position::{
    Datum, LabelPlacement, LabelScales, PositionScale, ScaleLinear, polar_label_angle,
};
pub use style::{
    DEFAULT_FILL, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE, FontSize, LabelStyle,
    ResolvedStyle, ResolvedStyles, StyleSpec, resolve_font_size,
};
pub use transform::{Transform, TransformOp};
pub use value::{Dynamic, LabelContext};
pub use warning::{LabelWarning, TracingWarnings, WarningSink};
