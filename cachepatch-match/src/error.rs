use thiserror::Error;

/// Errors from pattern construction and sequence editing.
///
/// `InvalidCursor` and `StaleCursor` indicate a caller bug: a scan result was
/// used without checking it, or against a different body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("pattern must contain at least one predicate")]
    EmptyPattern,

    #[error("cursor does not point at an instruction")]
    InvalidCursor,

    /// Detected by length only: a cursor from a different body of the same
    /// length is not caught.
    #[error("cursor was produced for a sequence of length {expected}, got length {actual}")]
    StaleCursor { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MatchError>;
