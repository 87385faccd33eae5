// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label layout.
//!
//! Label geometry (line spacing, background boxes, anchoring) depends on two
//! host capabilities that `VizIR` keeps downstream of the layout code:
//! - measuring the approximate size of a single line of text under a style, and
//! - resolving a unit-suffixed length (e.g. `0.71em`) against a font size.
//!
//! This crate is intentionally:
//! - small and dependency-free,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (shaping engines and web canvas measurement can both
//!   implement [`TextMeasurer`]).

#![no_std]

extern crate alloc;

mod length;

use alloc::sync::Arc;

pub use length::{Length, LengthParseError, LengthUnit};

/// A minimal text measurement interface used by label layout.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine, or
/// - backed by web platform text measurement (e.g. HTML canvas).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; label layout splits on `\n` before
    /// calling this.
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize;

    /// Resolves `length` to pixels, using `font_size` for font-relative units.
    ///
    /// The default implementation uses the fixed conversion factors of
    /// [`Length::to_pixels`].
    fn convert_length(&self, length: Length, font_size: f64) -> f64 {
        length.to_pixels(font_size)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize {
        (**self).measure(text, style)
    }

    fn convert_length(&self, length: Length, font_size: f64) -> f64 {
        (**self).convert_length(length, font_size)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
    /// Extra space added after every character, in pixels.
    pub letter_spacing: f64,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the letter spacing.
    #[must_use]
    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(14.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family or a full CSS font stack (e.g. `"'Gill Sans', sans-serif"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for FontFamily {
    fn from(value: &str) -> Self {
        match value {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            other => Self::Named(Arc::from(other)),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

impl FontStyle {
    /// Returns the CSS keyword for this style.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// The approximate rendered size of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextSize {
    /// Advance width in pixels.
    pub width: f64,
    /// Line box height in pixels.
    pub height: f64,
}

/// A tiny heuristic text measurer suitable for demos, tests, and early layout.
///
/// It assumes an average glyph width of ~0.6em and a line box of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextSize {
        let chars = text.chars().count() as f64;
        TextSize {
            width: (0.6 * style.font_size + style.letter_spacing) * chars,
            height: style.font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_width_scales_with_length_and_spacing() {
        let m = HeuristicTextMeasurer;
        let plain = m.measure("abcd", &TextStyle::new(10.0));
        assert!((plain.width - 24.0).abs() < 1e-9);
        assert!((plain.height - 10.0).abs() < 1e-9);

        let spaced = m.measure("abcd", &TextStyle::new(10.0).with_letter_spacing(1.0));
        assert!((spaced.width - 28.0).abs() < 1e-9);
    }

    #[test]
    fn measurer_converts_em_against_font_size() {
        let m = HeuristicTextMeasurer;
        let px = m.convert_length(Length::em(0.71), 20.0);
        assert!((px - 14.2).abs() < 1e-9);
    }

    #[test]
    fn generic_family_names_round_trip_to_css() {
        assert_eq!(FontFamily::from("serif"), FontFamily::Serif);
        let named = FontFamily::from("Inter, sans-serif");
        assert_eq!(named.as_css_family(), "Inter, sans-serif");
    }
}
