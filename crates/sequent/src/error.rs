//! Query and collection errors

use thiserror::Error;

/// Errors raised synchronously by query operations and collection mutations.
///
/// Every failure is a precondition violation on the caller's side; nothing is
/// retried internally and no operation commits a partial mutation before
/// returning one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Element access on an empty (or fully filtered) sequence
    #[error("Sequence contains no elements")]
    NoElements,

    /// `single` found more than one candidate
    #[error("Sequence contains more than one element")]
    MoreThanOneElement,

    /// Negative index passed to a positional operation
    #[error("Negative index is forbidden: {index}")]
    NegativeIndex { index: isize },

    /// Index outside the valid range of the operation
    #[error("Out of bounds: index {index}, length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// Unique insert of a key that is already present
    #[error("Key already exists: {key}")]
    KeyExists { key: String },
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Reject negative indices, converting the rest to `usize`.
pub(crate) fn checked_index(index: isize) -> QueryResult<usize> {
    usize::try_from(index).map_err(|_| QueryError::NegativeIndex { index })
}
