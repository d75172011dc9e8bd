//! Request execution with re-authentication on expired tokens.
//!
//! Every data request goes through [`RequestExecutor::execute`]. It adds the
//! API version, attaches the bearer token, and when the API answers 401/403
//! it refreshes the session and resubmits, up to the retry budget. Any other
//! status, success or not, is handed back to the caller untouched.

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::endpoints::API_VERSION;
use crate::error::FetchError;
use crate::host::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::retry::RetryStrategy;
use crate::session::Session;

/// Query parameter carrying the API version.
pub const API_VERSION_PARAM: &str = "apiVersion";

/// Executes authenticated requests for a [`Session`].
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    session: Arc<Session>,
    retry_strategy: RetryStrategy,
    api_version: String,
}

impl RequestExecutor {
    /// Creates an executor with the default retry budget.
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            retry_strategy: RetryStrategy::default(),
            api_version: API_VERSION.to_string(),
        }
    }

    /// Sets the retry strategy for this executor.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Overrides the `apiVersion` query parameter.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the retry strategy.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry_strategy
    }

    /// Sends a request, refreshing the token on 401/403.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RequestExhausted`] after `max_attempts`
    /// consecutive authorization failures, or a transport/login error.
    #[instrument(skip(self, query, body), fields(method = %method, url = %url))]
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        mut query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ApiResponse, FetchError> {
        if !query.iter().any(|(k, _)| k == API_VERSION_PARAM) {
            query.push((API_VERSION_PARAM.to_string(), self.api_version.clone()));
        }

        let mut base = ApiRequest::new(method, url);
        base.query = query;
        base.json = body;

        let transport: Arc<dyn HttpTransport> = self.session.transport();
        let max_attempts = self.retry_strategy.max_attempts;
        let mut auth = self.session.authorization_header().await?;
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            debug!(attempt = attempts, "Making request");

            let request = base.clone().with_header(AUTHORIZATION, auth.clone());

            let response = transport.send(request).await?;

            if !Session::is_expired(response.status) {
                return Ok(response);
            }

            warn!(status = %response.status, attempt = attempts, "Request unauthorized");

            if attempts < max_attempts {
                auth = self.session.reauthenticate(&auth).await?;

                let delay = self.retry_strategy.delay_for_attempt(attempts);
                if !delay.is_zero() {
                    debug!(delay_secs = delay.as_secs(), "Waiting before retry");
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(FetchError::RequestExhausted {
            attempts: max_attempts,
        })
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<ApiResponse, FetchError> {
        self.execute(Method::GET, url, query, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub async fn post_json(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        body: Value,
    ) -> Result<ApiResponse, FetchError> {
        self.execute(Method::POST, url, query, Some(body)).await
    }
}

// ============================================================================
// Tests
// ============================================================================
