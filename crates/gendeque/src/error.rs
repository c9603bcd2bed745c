//! Container and cursor error types.

use std::error::Error;
use std::fmt;

use crate::generation::Reason;

/// How serious a cursor invalidation is.
///
/// Ordered from least to most serious, so `Severity::Warning < Severity::Severe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The element is still present but its logical index has shifted.
    Warning,
    /// Generic staleness: the container changed since the cursor was taken.
    Mild,
    /// The cursor no longer lies inside the container's occupied window,
    /// or the container's whole contents were replaced.
    Moderate,
    /// The storage the cursor refers to is gone: the exact element was
    /// removed, or the container was destroyed.
    Severe,
}

impl Severity {
    /// Short human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`GenDeque`](crate::GenDeque) and its cursors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DequeError {
    /// A removal was attempted on an empty container.
    EmptyContainer {
        /// The operation that was rejected (`"pop_back"` or `"pop_front"`).
        operation: &'static str,
    },
    /// An index or cursor position lies outside the valid range.
    OutOfRange {
        /// The offending logical index. For cursors this is the offset from
        /// the start of the window captured when the cursor was taken.
        index: isize,
        /// Number of valid positions.
        len: usize,
    },
    /// A cursor was used after its generation had been retired.
    InvalidIterator {
        /// How serious the invalidation is.
        severity: Severity,
        /// The mutation that retired the cursor's generation.
        reason: Reason,
    },
    /// A live cursor was used with a container it was not taken from.
    ForeignCursor,
    /// A [`DequeConfig`](crate::DequeConfig) failed validation.
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: String,
    },
}

impl DequeError {
    /// The invalidation severity, if this is an `InvalidIterator` error.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::InvalidIterator { severity, .. } => Some(*severity),
            _ => None,
        }
    }
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContainer { operation } => {
                write!(f, "cannot {operation} on an empty container")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::InvalidIterator { severity, reason } => {
                write!(f, "invalid iterator ({severity}): generation retired by {reason}")
            }
            Self::ForeignCursor => write!(f, "cursor belongs to a different container"),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for DequeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_runs_warning_to_severe() {
        assert!(Severity::Warning < Severity::Mild);
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
    }

    #[test]
    fn display_includes_severity_and_reason() {
        let err = DequeError::InvalidIterator {
            severity: Severity::Moderate,
            reason: Reason::CopyAssign,
        };
        let msg = err.to_string();
        assert!(msg.contains("Moderate"));
        assert!(msg.contains("copy-assign"));
        assert_eq!(err.severity(), Some(Severity::Moderate));
    }

    #[test]
    fn non_cursor_errors_have_no_severity() {
        let err = DequeError::EmptyContainer {
            operation: "pop_back",
        };
        assert_eq!(err.severity(), None);
        assert_eq!(err.to_string(), "cannot pop_back on an empty container");
    }
}
