// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors and non-fatal runtime diagnostics.
//!
//! The engine's error taxonomy is deliberately small:
//!
//! - [`ConfigError`] is reported at construction and is non-recoverable for
//!   that instance.
//! - [`Diagnostic`] covers everything recovered locally at runtime. A
//!   diagnostic never accompanies a state corruption: the condition it
//!   reports has already been absorbed (clamped index, dropped stale
//!   result, forced mode switch) and the widget remains usable.
//!
//! Invalid transitions (for example a move on an empty list) are not
//! diagnosed at all; they reduce to the unchanged state and are never
//! surfaced as failures.

use alloc::boxed::Box;
use core::fmt;

/// Sink for non-fatal diagnostics.
pub type DiagnosticSink = Box<dyn FnMut(&Diagnostic)>;

/// Configuration rejected at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Neither a `default_value` nor a controlled `value` was supplied.
    MissingInitialValue,
    /// A controlled `value` was supplied without an `on_change` listener,
    /// which would make every dispatch unobservable.
    ControlledWithoutOnChange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInitialValue => {
                write!(f, "no initial state: supply default_value or value")
            }
            Self::ControlledWithoutOnChange => {
                write!(f, "controlled value supplied without an on_change listener")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// A condition that was recovered locally but is worth observing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// An external value was written to an instance constructed
    /// uncontrolled; the instance is now controlled for good.
    LateControlledSwitch,
    /// Both `default_value` and `value` were supplied at construction; the
    /// external value won.
    ConflictingInitialValues,
    /// An override reducer produced an index outside the current item
    /// sequence; the consuming controller clamped it before use.
    OverrideOutOfRange {
        /// The index the override produced.
        index: usize,
        /// Length of the sequence it was supposed to address.
        len: usize,
    },
    /// A filter-query response arrived after a newer query was issued and
    /// was dropped without touching state.
    StaleQueryDropped {
        /// Sequence number of the dropped response.
        issued: u64,
        /// Sequence number of the newest issued query.
        newest: u64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LateControlledSwitch => {
                write!(f, "uncontrolled instance switched to controlled mode")
            }
            Self::ConflictingInitialValues => {
                write!(f, "both default_value and value supplied; value wins")
            }
            Self::OverrideOutOfRange { index, len } => {
                write!(f, "override produced index {index} for a sequence of length {len}")
            }
            Self::StaleQueryDropped { issued, newest } => {
                write!(f, "dropped stale query response {issued} (newest is {newest})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_mentions_the_clamped_index() {
        let d = Diagnostic::OverrideOutOfRange { index: 9, len: 3 };
        let text = d.to_string();
        assert!(text.contains('9'), "display should name the bad index");
        assert!(text.contains('3'), "display should name the sequence length");
    }

    #[test]
    fn display_mentions_query_sequence_numbers() {
        let d = Diagnostic::StaleQueryDropped {
            issued: 4,
            newest: 7,
        };
        let text = d.to_string();
        assert!(text.contains('4'), "display should name the stale sequence");
        assert!(text.contains('7'), "display should name the newest sequence");
    }
}
