// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal layout diagnostics.
//!
//! Label layout never fails: malformed input is replaced by a default and
//! reported through a [`WarningSink`].

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// A recoverable problem found while resolving a label.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelWarning {
    /// A font size string could not be read as a number of pixels.
    UnparsableFontSize {
        /// The font size as written.
        value: Arc<str>,
    },
    /// A numeric font size was negative or not finite.
    InvalidFontSize {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for LabelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableFontSize { value } => write!(
                f,
                "fontSize should be expressed as a number of pixels, got {value:?}"
            ),
            Self::InvalidFontSize { value } => {
                write!(f, "fontSize must be a finite, non-negative number, got {value}")
            }
        }
    }
}

/// Receives warnings emitted during label layout.
pub trait WarningSink {
    /// Reports one warning.
    fn warn(&self, warning: LabelWarning);
}

/// Forwards warnings to `tracing` under the `vizir_label` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
    fn warn(&self, warning: LabelWarning) {
        tracing::warn!(target: "vizir_label", "{warning}");
    }
}

/// Collects warnings, e.g. for tests or for surfacing them in an editor.
impl WarningSink for RefCell<Vec<LabelWarning>> {
    fn warn(&self, warning: LabelWarning) {
        self.borrow_mut().push(warning);
    }
}

impl<T: WarningSink + ?Sized> WarningSink for &T {
    fn warn(&self, warning: LabelWarning) {
        (**self).warn(warning);
    }
}
