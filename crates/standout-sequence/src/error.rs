//! Error types for the sequence crate.

use thiserror::Error;

/// Errors returned by the fallible sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Two sort keys had no defined ordering (for example a NaN float).
    #[error("sort keys at positions {left} and {right} are not comparable")]
    Incomparable { left: usize, right: usize },

    /// A checked aggregate exceeded the range of its numeric type.
    #[error("arithmetic overflow while aggregating")]
    Overflow,

    /// No element satisfied the predicate.
    #[error("no element matched the predicate")]
    NoMatch,

    /// More than one element satisfied a predicate that expects exactly one.
    #[error("expected exactly one matching element, found {count}")]
    MultipleMatches { count: usize },
}

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SequenceError>;
