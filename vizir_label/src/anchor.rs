// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor positioning shared by text and background boxes.
//!
//! Given an anchor point and the extent of a box, these helpers return the
//! box's top-left corner. Results are snapped to whole pixels the same way
//! for text and backgrounds so the two never drift apart.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The anchor is the start of the text.
    #[default]
    Start,
    /// The anchor is the horizontal center of the text.
    Middle,
    /// The anchor is the end of the text.
    End,
    /// Defer to the renderer's inherited anchor.
    Inherit,
}

impl TextAnchor {
    /// Returns the SVG attribute value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
            Self::Inherit => "inherit",
        }
    }
}

/// Vertical anchor of a label block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    /// The anchor is the top of the block.
    Start,
    /// The anchor is the vertical center of the block.
    #[default]
    Middle,
    /// The anchor is the bottom of the block.
    End,
}

/// Text direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    Ltr,
    /// Right to left; boxes extend leftwards from the anchor.
    Rtl,
    /// Defer to the renderer's inherited direction.
    #[default]
    Inherit,
}

impl Direction {
    /// Returns the SVG attribute value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
            Self::Inherit => "inherit",
        }
    }
}

/// Rounds to the nearest integer, with halves rounded towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Returns the left edge of a box of `width` anchored at `x`.
pub fn anchor_x(direction: Direction, anchor: TextAnchor, x: f64, width: f64) -> f64 {
    if direction == Direction::Rtl {
        return x - width;
    }
    match anchor {
        TextAnchor::Start | TextAnchor::Inherit => x,
        TextAnchor::Middle => round_half_up(x - width / 2.0),
        TextAnchor::End => round_half_up(x - width),
    }
}

/// Returns the top edge of a block of `height` anchored at `y + dy`.
///
/// Inline labels occupy a single row, so an end anchor keeps the row at the
/// anchor instead of lifting it by its height.
pub fn anchor_y(anchor: VerticalAnchor, inline: bool, y: f64, dy: f64, height: f64) -> f64 {
    let offset = y + dy;
    match anchor {
        VerticalAnchor::Start => offset.floor(),
        VerticalAnchor::Middle => (offset - height / 2.0).floor(),
        VerticalAnchor::End if inline => offset.floor(),
        VerticalAnchor::End => (offset - height).ceil(),
    }
}
