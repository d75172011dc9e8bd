//! Sync errors.

use thiserror::Error;
use whoopdata_core::CoreError;
use whoopdata_fetch::{Endpoint, FetchError};

/// Errors raised by the typed accessors and pipelines.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The cycles list could not be fetched.
    #[error("Failed to get cycles: {status} - {body}")]
    CyclesFetchFailed {
        /// HTTP status.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A sleep vow could not be fetched.
    #[error("Failed to get sleep vow: {status} - {body}")]
    SleepVowFetchFailed {
        /// HTTP status.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A sleep event could not be fetched.
    #[error("Failed to get sleep event: {status} - {body}")]
    SleepEventFetchFailed {
        /// HTTP status.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The heart rate series could not be fetched.
    #[error("Failed to get heart rate data: {status} - {body}")]
    HeartRateFetchFailed {
        /// HTTP status.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A recovery vow could not be fetched.
    #[error("Failed to get recovery vow: {status} - {body}")]
    RecoveryFetchFailed {
        /// HTTP status.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A 200 response did not match the expected shape.
    #[error("Invalid {endpoint} response: {source}")]
    Decode {
        /// Endpoint that answered.
        endpoint: Endpoint,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A sleep stage entry could not be interpreted.
    #[error("Malformed sleep stage: {0}")]
    MalformedStage(String),

    /// Request layer error.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Core error (e.g. invalid date).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SyncError {
    /// Returns the HTTP status for accessor failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::CyclesFetchFailed { status, .. }
            | SyncError::SleepVowFetchFailed { status, .. }
            | SyncError::SleepEventFetchFailed { status, .. }
            | SyncError::HeartRateFetchFailed { status, .. }
            | SyncError::RecoveryFetchFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
