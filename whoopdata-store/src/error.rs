//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Username or password not supplied and not in the environment.
    #[error(
        "Username and password must be provided either as arguments or via WHOOP_USERNAME and WHOOP_PASSWORD"
    )]
    CredentialsMissing,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the error means no credentials were available.
    pub fn is_credentials_missing(&self) -> bool {
        matches!(self, StoreError::CredentialsMissing)
    }
}
