// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label text content.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::value::{Dynamic, LabelContext};

/// A text value: a string, a number, or already-split lines.
#[derive(Clone, Debug, PartialEq)]
pub enum TextValue {
    /// A string; embedded `\n` start new lines.
    Text(String),
    /// A number, formatted with `Display`.
    Number(f64),
    /// Explicit lines; not split further.
    Lines(Vec<String>),
}

impl TextValue {
    /// Coerces the value into one line of text. Explicit lines are comma-joined.
    fn into_line(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
            Self::Lines(lines) => lines.join(","),
        }
    }

    /// Coerces the value into lines, splitting strings on `\n`.
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines,
            other => other.into_line().split('\n').map(String::from).collect(),
        }
    }
}

impl From<&str> for TextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for TextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for TextValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TextValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<String>> for TextValue {
    fn from(value: Vec<String>) -> Self {
        Self::Lines(value)
    }
}

impl From<&str> for Dynamic<TextValue> {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

/// A label's text as authored.
#[derive(Clone, Debug)]
pub enum TextSpec {
    /// One value, split on `\n`. A function may return `None` to render nothing.
    Single(Dynamic<Option<TextValue>>),
    /// One value per line, each resolved on its own and never split.
    Lines(Vec<Dynamic<TextValue>>),
}

impl TextSpec {
    /// Text computed from the label being rendered.
    pub fn func(f: impl Fn(&LabelContext<'_>) -> Option<TextValue> + Send + Sync + 'static) -> Self {
        Self::Single(Dynamic::func(f))
    }

    /// Text given line by line.
    pub fn lines(lines: impl IntoIterator<Item = Dynamic<TextValue>>) -> Self {
        Self::Lines(lines.into_iter().collect())
    }
}

impl From<TextValue> for TextSpec {
    fn from(value: TextValue) -> Self {
        Self::Single(Dynamic::Value(Some(value)))
    }
}

impl From<&str> for TextSpec {
    fn from(value: &str) -> Self {
        TextValue::from(value).into()
    }
}

impl From<String> for TextSpec {
    fn from(value: String) -> Self {
        TextValue::from(value).into()
    }
}

impl From<f64> for TextSpec {
    fn from(value: f64) -> Self {
        TextValue::from(value).into()
    }
}

impl From<i32> for TextSpec {
    fn from(value: i32) -> Self {
        TextValue::from(value).into()
    }
}

impl From<Vec<&str>> for TextSpec {
    fn from(lines: Vec<&str>) -> Self {
        Self::lines(
            lines
                .into_iter()
                .map(|line| Dynamic::Value(TextValue::from(line))),
        )
    }
}

/// Resolves `spec` into lines.
///
/// Returns `None` when there is nothing to render: no text, a function that
/// returned `None`, or an empty list of lines. A resolved single value always
/// yields at least one line, even if it is empty.
pub fn resolve_content(spec: Option<&TextSpec>, cx: &LabelContext<'_>) -> Option<Vec<String>> {
    let lines = match spec? {
        TextSpec::Lines(lines) => lines
            .iter()
            .map(|line| line.evaluate(cx).into_line())
            .collect(),
        TextSpec::Single(value) => value.evaluate(cx)?.into_lines(),
    };
    (!lines.is_empty()).then_some(lines)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::label::LabelSpec;

    fn resolve(spec: Option<TextSpec>) -> Option<Vec<String>> {
        let label = LabelSpec::default();
        resolve_content(spec.as_ref(), &LabelContext::new(&label))
    }

    #[test]
    fn absent_text_renders_nothing() {
        assert_eq!(resolve(None), None);
        assert_eq!(resolve(Some(TextSpec::func(|_| None))), None);
        assert_eq!(resolve(Some(TextSpec::Lines(Vec::new()))), None);
    }

    #[test]
    fn strings_split_on_newlines() {
        assert_eq!(
            resolve(Some("a\nb".into())),
            Some(vec![String::from("a"), String::from("b")])
        );
        assert_eq!(resolve(Some("".into())), Some(vec![String::new()]));
    }

    #[test]
    fn numbers_are_formatted() {
        assert_eq!(resolve(Some(42.into())), Some(vec![String::from("42")]));
        assert_eq!(resolve(Some(1.5.into())), Some(vec![String::from("1.5")]));
    }

    #[test]
    fn list_elements_resolve_independently() {
        let spec = TextSpec::lines([
            Dynamic::from("x"),
            Dynamic::func(|_| TextValue::from("y")),
        ]);
        assert_eq!(
            resolve(Some(spec)),
            Some(vec![String::from("x"), String::from("y")])
        );
    }

    #[test]
    fn list_elements_are_not_split() {
        assert_eq!(
            resolve(Some(vec!["a\nb", "c"].into())),
            Some(vec![String::from("a\nb"), String::from("c")])
        );
    }

    #[test]
    fn functions_see_the_datum() {
        let label = LabelSpec::default().with_datum(crate::Datum::new(3.0, 7.0));
        let spec = TextSpec::func(|cx| cx.datum().map(|d| TextValue::from(d.y)));
        assert_eq!(
            resolve_content(Some(&spec), &LabelContext::new(&label)),
            Some(vec![String::from("7")])
        );
    }
}
