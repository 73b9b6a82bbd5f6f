//! Boundary transformer error types.

use thiserror::Error;

use monto_shared::MoneyError;

/// Errors raised while decoding or encoding a payload.
///
/// Any error aborts the whole call; no partially transformed tree is returned.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// A registered money field held a number or string that is not a
    /// finite decimal.
    #[error("Invalid value for monetary field '{field}': {source}")]
    InvalidField {
        /// Offending field name.
        field: String,
        /// Construction failure.
        source: MoneyError,
    },

    /// A registered money field held a value of the wrong type while the
    /// strict mismatch policy is active.
    #[error("Monetary field '{field}' holds a {found}, expected a number or string")]
    TypeMismatch {
        /// Offending field name.
        field: String,
        /// Observed JSON type.
        found: &'static str,
    },

    /// Payload text is not valid JSON.
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
