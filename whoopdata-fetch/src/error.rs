//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Username or password was not supplied.
    #[error(
        "WHOOP credentials not provided. Pass them explicitly or set WHOOP_USERNAME and WHOOP_PASSWORD"
    )]
    CredentialsMissing,

    /// The auth endpoint rejected the credentials.
    #[error("Authentication failed: HTTP {status} - {body}")]
    AuthenticationRejected {
        /// HTTP status returned by the auth endpoint.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Every attempt was answered with 401/403.
    #[error("Request failed after {attempts} retries")]
    RequestExhausted {
        /// Number of attempts made.
        attempts: u32,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// A header value could not be built.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response from the API.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
