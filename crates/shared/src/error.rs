//! Monetary error types.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by monetary construction and arithmetic.
///
/// All variants are local, synchronous failures. They signal bad input or a
/// programming error, never a transient condition, so nothing retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input is non-finite, empty, or does not parse as a decimal.
    #[error("Invalid monetary value: {0}")]
    InvalidValue(String),

    /// Divisor is exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Argument outside the accepted domain (e.g. zero distribution parts).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Result leaves the representable decimal range.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidValue(_) => "INVALID_VALUE",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Overflow(_) => "OVERFLOW",
        }
    }
}
