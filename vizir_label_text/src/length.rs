// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit-suffixed lengths.
//!
//! Font-relative units resolve against a font size; absolute units use fixed
//! pixel factors (96 dpi, rounded the way browsers commonly approximate them).

use core::fmt;
use core::str::FromStr;

/// The unit of a [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// CSS pixels.
    Px,
    /// Multiples of the font size.
    Em,
    /// Half of the font size.
    Ex,
    /// Points.
    Pt,
    /// Picas.
    Pc,
    /// Inches.
    In,
    /// Millimetres.
    Mm,
    /// Centimetres.
    Cm,
}

impl LengthUnit {
    /// Returns the CSS suffix for this unit.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Mm => "mm",
            Self::Cm => "cm",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "" | "px" => Self::Px,
            "em" => Self::Em,
            "ex" => Self::Ex,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "in" => Self::In,
            "mm" => Self::Mm,
            "cm" => Self::Cm,
            _ => return None,
        })
    }
}

/// A length with a unit, e.g. `0.71em` or `12px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    /// The numeric magnitude.
    pub value: f64,
    /// The unit `value` is expressed in.
    pub unit: LengthUnit,
}

impl Length {
    /// Creates a length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// Creates a length in ems.
    #[must_use]
    pub const fn em(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Em,
        }
    }

    /// Parses a CSS-like length. A bare number is interpreted as pixels.
    pub fn parse(text: &str) -> Result<Self, LengthParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LengthParseError::Empty);
        }
        // The unit is the trailing run of letters; an exponent (`1e3px`) is
        // always followed by a digit, so it never joins that run.
        let split = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic())
            .last()
            .map_or(text.len(), |(i, _)| i);
        let (number, suffix) = text.split_at(split);
        let unit = LengthUnit::from_suffix(suffix).ok_or(LengthParseError::UnknownUnit)?;
        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|_| LengthParseError::InvalidNumber)?;
        Ok(Self { value, unit })
    }

    /// Resolves this length to pixels, using `font_size` for `em`/`ex`.
    #[must_use]
    pub fn to_pixels(self, font_size: f64) -> f64 {
        let factor = match self.unit {
            LengthUnit::Px => 1.0,
            LengthUnit::Em => font_size,
            LengthUnit::Ex => 0.5 * font_size,
            LengthUnit::Pt => 1.33,
            LengthUnit::Pc => 16.0,
            LengthUnit::In => 96.0,
            LengthUnit::Mm => 3.8,
            LengthUnit::Cm => 38.0,
        };
        self.value * factor
    }
}

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Errors returned by [`Length::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthParseError {
    /// The input was empty or only whitespace.
    Empty,
    /// The numeric part could not be parsed.
    InvalidNumber,
    /// The unit suffix is not recognized.
    UnknownUnit,
}

impl fmt::Display for LengthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty length"),
            Self::InvalidNumber => f.write_str("length has no valid numeric value"),
            Self::UnknownUnit => f.write_str("length has an unknown unit"),
        }
    }
}

impl core::error::Error for LengthParseError {}
