//! Core error types for `whoopdata`.

use thiserror::Error;

/// Core error type for `whoopdata` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller-supplied date was not in `YYYY-MM-DD` form.
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// Invalid data in a vendor payload.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
