//! Error types for the zwrap value layer.
//!
//! Every failure raised by the rational and bit-vector types is one of the
//! kinds below. Failures are local and synchronous: an operation either
//! returns a fully valid value or one of these errors, never a partial result.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the zwrap crates.
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors raised by value construction, arithmetic, conversion and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Bit width of zero or otherwise structurally invalid.
    #[error("invalid width: {0}")]
    InvalidWidth(String),

    /// Negative shift/rotate amount, oversized input, bad digits, bad target width.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two bit-vectors of different width were combined.
    #[error("BitVec size mismatch: {left} != {right}")]
    WidthMismatch {
        /// Width of the left operand.
        left: u32,
        /// Width of the right operand.
        right: u32,
    },

    /// Division, remainder or reciprocal by zero.
    #[error("{0}")]
    DivisionByZero(String),

    /// A value does not fit the target type.
    #[error("{0}")]
    Overflow(String),

    /// A non-integral rational was converted to an integer type.
    #[error("{0}")]
    NotAnInteger(String),

    /// Unparsable input or unknown format specifier.
    #[error("{0}")]
    FormatError(String),
}

/// Discriminant of a [`ValueError`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ValueError::InvalidWidth`].
    InvalidWidth,
    /// See [`ValueError::InvalidArgument`].
    InvalidArgument,
    /// See [`ValueError::WidthMismatch`].
    WidthMismatch,
    /// See [`ValueError::DivisionByZero`].
    DivisionByZero,
    /// See [`ValueError::Overflow`].
    Overflow,
    /// See [`ValueError::NotAnInteger`].
    NotAnInteger,
    /// See [`ValueError::FormatError`].
    FormatError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidWidth => "invalid width",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::WidthMismatch => "width mismatch",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::Overflow => "overflow",
            ErrorKind::NotAnInteger => "not an integer",
            ErrorKind::FormatError => "format error",
        };
        f.write_str(name)
    }
}

impl ValueError {
    /// Create an invalid width error.
    pub fn invalid_width(message: impl Into<String>) -> Self {
        ValueError::InvalidWidth(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ValueError::InvalidArgument(message.into())
    }

    /// Create a width mismatch error.
    pub fn width_mismatch(left: u32, right: u32) -> Self {
        ValueError::WidthMismatch { left, right }
    }

    /// The canonical division by zero error.
    pub fn division_by_zero() -> Self {
        ValueError::DivisionByZero("Division by zero is not allowed".to_string())
    }

    /// Create an overflow error.
    pub fn overflow(message: impl Into<String>) -> Self {
        ValueError::Overflow(message.into())
    }

    /// Create a not-an-integer error.
    pub fn not_an_integer(message: impl Into<String>) -> Self {
        ValueError::NotAnInteger(message.into())
    }

    /// Create a format error.
    pub fn format_error(message: impl Into<String>) -> Self {
        ValueError::FormatError(message.into())
    }

    /// Kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::InvalidWidth(_) => ErrorKind::InvalidWidth,
            ValueError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ValueError::WidthMismatch { .. } => ErrorKind::WidthMismatch,
            ValueError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            ValueError::Overflow(_) => ErrorKind::Overflow,
            ValueError::NotAnInteger(_) => ErrorKind::NotAnInteger,
            ValueError::FormatError(_) => ErrorKind::FormatError,
        }
    }

    /// Message prefixed with the error kind, e.g. `overflow: Signed value ...`.
    #[must_use]
    pub fn detailed_message(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}
