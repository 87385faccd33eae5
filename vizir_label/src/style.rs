// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label styles.
//!
//! A label takes either one [`LabelStyle`] or one per line. Resolution merges
//! each entry onto the default style, evaluates dynamic fields, and parses the
//! font size, producing a non-empty [`ResolvedStyles`] list.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::{Brush, Color};
use vizir_label_text::{FontFamily, FontStyle, FontWeight, TextStyle};

use crate::anchor::{TextAnchor, VerticalAnchor};
use crate::transform::Transform;
use crate::value::{Dynamic, LabelContext};
use crate::warning::{LabelWarning, WarningSink};

/// Font size used when a style has none, or an unusable one.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
/// Font stack used when a style names none.
pub const DEFAULT_FONT_FAMILY: &str =
    "'Gill Sans', 'Gill Sans MT', 'Seravek', 'Trebuchet MS', sans-serif";
/// Text fill used when a style names none (`#252525`).
pub const DEFAULT_FILL: Color = Color::from_rgb8(0x25, 0x25, 0x25);
/// Text stroke used when a style names none.
pub const DEFAULT_STROKE: Color = Color::TRANSPARENT;

/// A font size as authored: pixels, or a CSS string such as `"12px"`.
#[derive(Clone, Debug, PartialEq)]
pub enum FontSize {
    /// A size in pixels.
    Px(f64),
    /// A size as text; only a pixel (or unitless) number is accepted.
    Css(Arc<str>),
}

impl From<f64> for FontSize {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl From<&str> for FontSize {
    fn from(value: &str) -> Self {
        Self::Css(Arc::from(value))
    }
}

/// A text style as authored. Unset fields fall back to the defaults.
#[derive(Clone, Debug, Default)]
pub struct LabelStyle {
    /// Font size.
    pub font_size: Option<Dynamic<FontSize>>,
    /// Font family or CSS font stack.
    pub font_family: Option<Dynamic<FontFamily>>,
    /// Font weight.
    pub font_weight: Option<FontWeight>,
    /// Font style.
    pub font_style: Option<FontStyle>,
    /// Extra space after each character, in pixels.
    pub letter_spacing: Option<Dynamic<f64>>,
    /// Text fill paint.
    pub fill: Option<Dynamic<Brush>>,
    /// Text stroke paint.
    pub stroke: Option<Dynamic<Brush>>,
    /// Text stroke width.
    pub stroke_width: Option<Dynamic<f64>>,
    /// Text opacity.
    pub opacity: Option<Dynamic<f64>>,
    /// Horizontal anchor override for this line.
    pub text_anchor: Option<Dynamic<TextAnchor>>,
    /// Vertical anchor override (read from the first style only).
    pub vertical_anchor: Option<Dynamic<VerticalAnchor>>,
    /// Rotation override in degrees (read from the first style only).
    pub angle: Option<Dynamic<f64>>,
    /// Transform override (read from the first style only).
    pub transform: Option<Dynamic<Transform>>,
    /// Other presentation properties, passed through to the renderer untouched.
    pub extra: HashMap<Arc<str>, Arc<str>>,
}

impl LabelStyle {
    /// Creates an empty style (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: impl Into<FontSize>) -> Self {
        self.font_size = Some(Dynamic::Value(font_size.into()));
        self
    }

    /// Sets the font size from the label being rendered.
    pub fn with_font_size_fn(
        mut self,
        f: impl Fn(&LabelContext<'_>) -> FontSize + Send + Sync + 'static,
    ) -> Self {
        self.font_size = Some(Dynamic::func(f));
        self
    }

    /// Sets the font family.
    pub fn with_font_family(mut self, font_family: impl Into<FontFamily>) -> Self {
        self.font_family = Some(Dynamic::Value(font_family.into()));
        self
    }

    /// Sets the font weight.
    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = Some(font_weight);
        self
    }

    /// Sets the letter spacing.
    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = Some(letter_spacing.into());
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(Dynamic::Value(fill.into()));
        self
    }

    /// Sets the fill paint from the label being rendered.
    pub fn with_fill_fn(
        mut self,
        f: impl Fn(&LabelContext<'_>) -> Brush + Send + Sync + 'static,
    ) -> Self {
        self.fill = Some(Dynamic::func(f));
        self
    }

    /// Sets the stroke paint.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.stroke = Some(Dynamic::Value(stroke.into()));
        self
    }

    /// Sets the horizontal anchor override.
    pub fn with_text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.text_anchor = Some(anchor.into());
        self
    }

    /// Sets the vertical anchor override.
    pub fn with_vertical_anchor(mut self, anchor: VerticalAnchor) -> Self {
        self.vertical_anchor = Some(anchor.into());
        self
    }

    /// Sets the rotation override (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle.into());
        self
    }

    /// Sets the transform override.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Adds a pass-through presentation property.
    pub fn with_extra(mut self, name: &str, value: &str) -> Self {
        self.extra.insert(Arc::from(name), Arc::from(value));
        self
    }

    /// Merges this style onto the defaults and evaluates its dynamic fields.
    pub fn resolve(&self, cx: &LabelContext<'_>, warnings: &dyn WarningSink) -> ResolvedStyle {
        let eval = |v: &Option<Dynamic<f64>>| v.as_ref().map(|d| d.evaluate(cx));
        let font_size = self.font_size.as_ref().map(|d| d.evaluate(cx));
        ResolvedStyle {
            font_size: resolve_font_size(font_size.as_ref(), warnings),
            font_family: self
                .font_family
                .as_ref()
                .map_or_else(default_font_family, |d| d.evaluate(cx)),
            font_weight: self.font_weight.unwrap_or(FontWeight::NORMAL),
            font_style: self.font_style.unwrap_or(FontStyle::Normal),
            letter_spacing: eval(&self.letter_spacing).unwrap_or(0.0),
            fill: self
                .fill
                .as_ref()
                .map_or(Brush::Solid(DEFAULT_FILL), |d| d.evaluate(cx)),
            stroke: self
                .stroke
                .as_ref()
                .map_or(Brush::Solid(DEFAULT_STROKE), |d| d.evaluate(cx)),
            stroke_width: eval(&self.stroke_width),
            opacity: eval(&self.opacity),
            text_anchor: self.text_anchor.as_ref().map(|d| d.evaluate(cx)),
            vertical_anchor: self.vertical_anchor.as_ref().map(|d| d.evaluate(cx)),
            angle: eval(&self.angle),
            transform: self.transform.as_ref().map(|d| d.evaluate(cx)),
            extra: self.extra.clone(),
        }
    }
}

fn default_font_family() -> FontFamily {
    FontFamily::Named(Arc::from(DEFAULT_FONT_FAMILY))
}

/// Converts an authored font size to pixels.
///
/// Absent sizes use [`DEFAULT_FONT_SIZE`]. Unparsable (including blank),
/// negative, or non-finite sizes also use it, after reporting a warning.
pub fn resolve_font_size(font_size: Option<&FontSize>, warnings: &dyn WarningSink) -> f64 {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    match font_size {
        None => DEFAULT_FONT_SIZE,
        Some(FontSize::Px(v)) if usable(*v) => *v,
        Some(FontSize::Px(v)) => {
            warnings.warn(LabelWarning::InvalidFontSize { value: *v });
            DEFAULT_FONT_SIZE
        }
        Some(FontSize::Css(text)) => {
            let trimmed = text.trim();
            let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
            match number.parse::<f64>() {
                Ok(v) if usable(v) => v,
                _ => {
                    warnings.warn(LabelWarning::UnparsableFontSize {
                        value: Arc::clone(text),
                    });
                    DEFAULT_FONT_SIZE
                }
            }
        }
    }
}

/// A fully resolved text style for one line.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Font size in pixels; always finite and non-negative.
    pub font_size: f64,
    /// Font family or CSS font stack.
    pub font_family: FontFamily,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Extra space after each character, in pixels.
    pub letter_spacing: f64,
    /// Text fill paint.
    pub fill: Brush,
    /// Text stroke paint.
    pub stroke: Brush,
    /// Text stroke width, if set.
    pub stroke_width: Option<f64>,
    /// Text opacity, if set.
    pub opacity: Option<f64>,
    /// Horizontal anchor override.
    pub text_anchor: Option<TextAnchor>,
    /// Vertical anchor override.
    pub vertical_anchor: Option<VerticalAnchor>,
    /// Rotation override in degrees.
    pub angle: Option<f64>,
    /// Transform override.
    pub transform: Option<Transform>,
    /// Pass-through presentation properties.
    pub extra: HashMap<Arc<str>, Arc<str>>,
}

impl ResolvedStyle {
    /// The subset of this style that affects measurement.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            font_weight: self.font_weight,
            font_style: self.font_style,
            letter_spacing: self.letter_spacing,
        }
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: default_font_family(),
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
            fill: Brush::Solid(DEFAULT_FILL),
            stroke: Brush::Solid(DEFAULT_STROKE),
            stroke_width: None,
            opacity: None,
            text_anchor: None,
            vertical_anchor: None,
            angle: None,
            transform: None,
            extra: HashMap::new(),
        }
    }
}

/// A label's style: one for every line, or one per line.
#[derive(Clone, Debug)]
pub enum StyleSpec {
    /// One style for all lines.
    Single(LabelStyle),
    /// One style per line. Lines past the end reuse the last style.
    PerLine(Vec<LabelStyle>),
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::Single(LabelStyle::default())
    }
}

impl From<LabelStyle> for StyleSpec {
    fn from(style: LabelStyle) -> Self {
        Self::Single(style)
    }
}

impl From<Vec<LabelStyle>> for StyleSpec {
    fn from(styles: Vec<LabelStyle>) -> Self {
        Self::PerLine(styles)
    }
}

/// A non-empty list of resolved styles.
///
/// Line `i` uses entry `i`; lines past the end reuse the last entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyles {
    styles: Vec<ResolvedStyle>,
}

impl ResolvedStyles {
    /// Resolves every entry of `spec`. An empty per-line list resolves to the default style.
    pub fn resolve(spec: &StyleSpec, cx: &LabelContext<'_>, warnings: &dyn WarningSink) -> Self {
        let styles = match spec {
            StyleSpec::PerLine(list) if !list.is_empty() => {
                list.iter().map(|s| s.resolve(cx, warnings)).collect()
            }
            StyleSpec::PerLine(_) => vec![LabelStyle::default().resolve(cx, warnings)],
            StyleSpec::Single(style) => vec![style.resolve(cx, warnings)],
        };
        Self { styles }
    }

    /// The style of the first line.
    pub fn first(&self) -> &ResolvedStyle {
        &self.styles[0]
    }

    /// The style of line `index`.
    pub fn line(&self, index: usize) -> &ResolvedStyle {
        &self.styles[index.min(self.styles.len() - 1)]
    }

    /// Number of distinct entries (not lines).
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always `false`: a resolved list has at least one entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The resolved entries.
    pub fn as_slice(&self) -> &[ResolvedStyle] {
        &self.styles
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use core::cell::RefCell;

    use peniko::color::palette::css;

    use super::*;
    use crate::label::LabelSpec;

    fn resolve(spec: StyleSpec) -> (ResolvedStyles, Vec<LabelWarning>) {
        let label = LabelSpec::new("x");
        let cx = LabelContext::new(&label);
        let warnings = RefCell::new(Vec::new());
        let styles = ResolvedStyles::resolve(&spec, &cx, &warnings);
        (styles, warnings.into_inner())
    }

    #[test]
    fn pixel_strings_are_parsed() {
        let (styles, warnings) = resolve(LabelStyle::new().with_font_size("18px").into());
        assert_eq!(styles.first().font_size, 18.0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unparsable_font_size_warns_once_and_uses_default() {
        let (styles, warnings) = resolve(LabelStyle::new().with_font_size("abcpx").into());
        assert_eq!(styles.first().font_size, DEFAULT_FONT_SIZE);
        assert_eq!(
            warnings,
            vec![LabelWarning::UnparsableFontSize {
                value: Arc::from("abcpx")
            }]
        );
    }

    #[test]
    fn blank_font_size_is_unparsable() {
        for blank in ["", "  ", "px"] {
            let (styles, warnings) = resolve(LabelStyle::new().with_font_size(blank).into());
            assert_eq!(styles.first().font_size, DEFAULT_FONT_SIZE);
            assert_eq!(warnings.len(), 1);
        }
    }

    #[test]
    fn negative_and_nan_sizes_fall_back() {
        for bad in [-3.0, f64::NAN, f64::INFINITY] {
            let (styles, warnings) = resolve(LabelStyle::new().with_font_size(bad).into());
            assert_eq!(styles.first().font_size, DEFAULT_FONT_SIZE);
            assert_eq!(warnings.len(), 1);
        }
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let (styles, _) = resolve(StyleSpec::default());
        assert_eq!(*styles.first(), ResolvedStyle::default());
        assert_eq!(styles.first().fill, Brush::Solid(DEFAULT_FILL));
    }

    #[test]
    fn per_line_styles_reuse_the_last_entry() {
        let (styles, _) = resolve(
            vec![
                LabelStyle::new().with_font_size(20.0),
                LabelStyle::new().with_font_size(10.0).with_fill(css::RED),
            ]
            .into(),
        );
        assert_eq!(styles.len(), 2);
        assert_eq!(styles.line(0).font_size, 20.0);
        assert_eq!(styles.line(5).font_size, 10.0);
        assert_eq!(styles.line(5).fill, Brush::Solid(css::RED));
    }

    #[test]
    fn empty_per_line_list_resolves_to_default() {
        let (styles, _) = resolve(StyleSpec::PerLine(Vec::new()));
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.first().font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn dynamic_fields_see_resolved_lines() {
        let style = LabelStyle::new().with_font_size_fn(|cx| {
            let longest = cx
                .lines()
                .into_iter()
                .flatten()
                .map(String::len)
                .max()
                .unwrap_or(0);
            FontSize::Px(if longest > 3 { 10.0 } else { 16.0 })
        });
        let label = LabelSpec::new("x");
        let lines = vec![String::from("long line")];
        let cx = LabelContext::new(&label).with_lines(&lines);
        let resolved = style.resolve(&cx, &RefCell::new(Vec::new()));
        assert_eq!(resolved.font_size, 10.0);
    }
}
