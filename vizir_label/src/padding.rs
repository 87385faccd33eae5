// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background padding.

extern crate alloc;

use alloc::vec::Vec;

/// Per-side padding in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Space above the text.
    pub top: f64,
    /// Space below the text.
    pub bottom: f64,
    /// Space before the text.
    pub left: f64,
    /// Space after the text.
    pub right: f64,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same padding on every side.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Self::uniform(value)
    }
}

/// Padding with optional sides; missing sides are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingSides {
    /// Space above the text.
    pub top: Option<f64>,
    /// Space below the text.
    pub bottom: Option<f64>,
    /// Space before the text.
    pub left: Option<f64>,
    /// Space after the text.
    pub right: Option<f64>,
}

impl From<PaddingSides> for Padding {
    fn from(sides: PaddingSides) -> Self {
        Self {
            top: sides.top.unwrap_or(0.0),
            bottom: sides.bottom.unwrap_or(0.0),
            left: sides.left.unwrap_or(0.0),
            right: sides.right.unwrap_or(0.0),
        }
    }
}

/// Background padding for a whole label or for each line.
#[derive(Clone, Debug, PartialEq)]
pub enum PaddingSpec {
    /// One padding shared by every line (and by a block background).
    Uniform(Padding),
    /// One padding per line; lines without an entry get no padding.
    PerLine(Vec<Padding>),
}

impl Default for PaddingSpec {
    fn default() -> Self {
        Self::Uniform(Padding::ZERO)
    }
}

impl PaddingSpec {
    /// The padding of line `index`.
    pub fn line(&self, index: usize) -> Padding {
        match self {
            Self::Uniform(p) => *p,
            Self::PerLine(lines) => lines.get(index).copied().unwrap_or(Padding::ZERO),
        }
    }

    /// The padding of a block background: the first entry of a per-line list.
    pub fn block(&self) -> Padding {
        self.line(0)
    }
}

impl From<f64> for PaddingSpec {
    fn from(value: f64) -> Self {
        Self::Uniform(Padding::uniform(value))
    }
}

impl From<Padding> for PaddingSpec {
    fn from(value: Padding) -> Self {
        Self::Uniform(value)
    }
}

impl From<PaddingSides> for PaddingSpec {
    fn from(value: PaddingSides) -> Self {
        Self::Uniform(value.into())
    }
}

impl<P: Into<Padding>> From<Vec<P>> for PaddingSpec {
    fn from(values: Vec<P>) -> Self {
        Self::PerLine(values.into_iter().map(Into::into).collect())
    }
}
