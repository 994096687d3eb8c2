//! Error types for loading and saving sparse matrix files

use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`FormatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cannot open, read or write the stream
    Io,
    /// Header has the wrong token count or grammar
    MalformedHeader,
    /// A body token could not be parsed
    MalformedEntry,
    /// A line carries a different number of fields than its dialect requires
    FieldCount,
    /// Declared and counted rows, columns or non-zeros disagree
    DimensionMismatch,
    /// Index outside the declared or discovered bounds
    OutOfRangeIndex,
    /// Symmetric input violates the one-sided listing rule
    InvalidTriangle,
    /// The second pass over the input disagreed with the first
    StreamInconsistency,
    /// Flag combination the format does not define
    UnsupportedDialect,
    /// A symmetric-only saver received a non-symmetric matrix
    NotSymmetric,
    /// Non-comment content after the declared body
    TrailingContent,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::MalformedHeader => "malformed_header",
            ErrorKind::MalformedEntry => "malformed_entry",
            ErrorKind::FieldCount => "field_count",
            ErrorKind::DimensionMismatch => "dimension_mismatch",
            ErrorKind::OutOfRangeIndex => "out_of_range_index",
            ErrorKind::InvalidTriangle => "invalid_triangle",
            ErrorKind::StreamInconsistency => "stream_inconsistency",
            ErrorKind::UnsupportedDialect => "unsupported_dialect",
            ErrorKind::NotSymmetric => "not_symmetric",
            ErrorKind::TrailingContent => "trailing_content",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised by every loader and saver
///
/// Any error aborts the whole operation: loaders never hand back a partially
/// built matrix, and savers reject invalid input before writing anything.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("[io] {0}")]
    Io(#[from] std::io::Error),

    #[error("[malformed_header] line {line}: {message}")]
    MalformedHeader { line: usize, message: String },

    #[error("[malformed_entry] line {line}: cannot parse `{token}`")]
    MalformedEntry { line: usize, token: String },

    #[error("[field_count] line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: String,
        found: usize,
    },

    #[error("[dimension_mismatch] {what}: declared {declared}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        declared: usize,
        found: usize,
    },

    #[error("[out_of_range_index] line {line}: {axis} index {index} outside 1..={bound}")]
    OutOfRangeIndex {
        line: usize,
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    #[error("[invalid_triangle] line {line}: entry ({row}, {col}) is on the wrong side of the diagonal")]
    InvalidTriangle { line: usize, row: usize, col: usize },

    #[error("[stream_inconsistency] {0}")]
    StreamInconsistency(String),

    #[error("[unsupported_dialect] {0}")]
    UnsupportedDialect(String),

    #[error("[not_symmetric] {0}")]
    NotSymmetric(String),

    #[error("[trailing_content] line {line}: data after the declared body")]
    TrailingContent { line: usize },
}

impl FormatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::Io(_) => ErrorKind::Io,
            FormatError::MalformedHeader { .. } => ErrorKind::MalformedHeader,
            FormatError::MalformedEntry { .. } => ErrorKind::MalformedEntry,
            FormatError::FieldCount { .. } => ErrorKind::FieldCount,
            FormatError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            FormatError::OutOfRangeIndex { .. } => ErrorKind::OutOfRangeIndex,
            FormatError::InvalidTriangle { .. } => ErrorKind::InvalidTriangle,
            FormatError::StreamInconsistency(_) => ErrorKind::StreamInconsistency,
            FormatError::UnsupportedDialect(_) => ErrorKind::UnsupportedDialect,
            FormatError::NotSymmetric(_) => ErrorKind::NotSymmetric,
            FormatError::TrailingContent { .. } => ErrorKind::TrailingContent,
        }
    }

    // Convenience constructors
    pub fn header(line: usize, message: impl Into<String>) -> Self {
        FormatError::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    pub fn entry(line: usize, token: impl Into<String>) -> Self {
        FormatError::MalformedEntry {
            line,
            token: token.into(),
        }
    }

    pub fn field_count(line: usize, expected: impl Into<String>, found: usize) -> Self {
        FormatError::FieldCount {
            line,
            expected: expected.into(),
            found,
        }
    }

    pub fn mismatch(what: &'static str, declared: usize, found: usize) -> Self {
        FormatError::DimensionMismatch {
            what,
            declared,
            found,
        }
    }

    pub fn out_of_range(line: usize, axis: &'static str, index: usize, bound: usize) -> Self {
        FormatError::OutOfRangeIndex {
            line,
            axis,
            index,
            bound,
        }
    }

    /// Header-declared size that overflows or cannot be allocated
    pub fn too_large(line: usize, what: &str, size: usize) -> Self {
        FormatError::header(line, format!("{} {} is too large", what, size))
    }

    pub fn inconsistent(message: impl Into<String>) -> Self {
        FormatError::StreamInconsistency(message.into())
    }

    pub fn dialect(message: impl Into<String>) -> Self {
        FormatError::UnsupportedDialect(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FormatError>;
