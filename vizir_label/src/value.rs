// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Literal-or-callable label properties.
//!
//! Most label properties may either be given directly or computed from the
//! label being rendered (its datum, index, resolved lines, ...). Every such
//! property is a [`Dynamic`] and is resolved through [`Dynamic::evaluate`].

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::label::LabelSpec;
use crate::position::Datum;

/// The evaluation context passed to callable properties.
#[derive(Clone, Copy, Debug)]
pub struct LabelContext<'a> {
    spec: &'a LabelSpec,
    lines: Option<&'a [String]>,
}

impl<'a> LabelContext<'a> {
    pub(crate) fn new(spec: &'a LabelSpec) -> Self {
        Self { spec, lines: None }
    }

    pub(crate) fn with_lines(self, lines: &'a [String]) -> Self {
        Self {
            spec: self.spec,
            lines: Some(lines),
        }
    }

    /// The label being rendered.
    pub fn spec(&self) -> &'a LabelSpec {
        self.spec
    }

    /// The datum the label is attached to, if any.
    pub fn datum(&self) -> Option<Datum> {
        self.spec.datum
    }

    /// The index of the label within its series, if any.
    pub fn index(&self) -> Option<usize> {
        self.spec.index
    }

    /// The resolved text lines.
    ///
    /// This is `None` while the text itself is being resolved.
    pub fn lines(&self) -> Option<&'a [String]> {
        self.lines
    }
}

/// A property that is either a literal value or a function of the label.
pub enum Dynamic<T> {
    /// A literal value.
    Value(T),
    /// A function evaluated against the label being rendered.
    Func(Arc<dyn Fn(&LabelContext<'_>) -> T + Send + Sync>),
}

impl<T: Clone> Dynamic<T> {
    /// Wraps a function as a dynamic property.
    pub fn func(f: impl Fn(&LabelContext<'_>) -> T + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// Resolves the property: calls the function, or returns the literal unchanged.
    pub fn evaluate(&self, cx: &LabelContext<'_>) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Func(f) => f(cx),
        }
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Func(f) => Self::Func(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<T> From<T> for Dynamic<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Dynamic<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}
