//! Authenticated session against the WHOOP auth service.
//!
//! A [`Session`] owns the account credentials and the current bearer token.
//! It logs in on construction, hands out `Authorization` header values, and
//! replaces the token when the API answers 401/403.
//!
//! Session state sits behind an async mutex that is held for the whole login
//! round-trip, so concurrent refreshes are serialized.

use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use whoopdata_core::ResourceId;

use crate::endpoints::{Endpoint, Endpoints};
use crate::error::FetchError;
use crate::host::http::{ApiRequest, HttpTransport};

// ============================================================================
// Credentials
// ============================================================================

/// Account credentials for password login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::CredentialsMissing`] if either value is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, FetchError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() || password.is_empty() {
            return Err(FetchError::CredentialsMissing);
        }

        Ok(Self { username, password })
    }

    /// Creates credentials from optional values.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::CredentialsMissing`] if either value is absent or empty.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, FetchError> {
        match (username, password) {
            (Some(username), Some(password)) => Self::new(username, password),
            _ => Err(FetchError::CredentialsMissing),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Auth Response
// ============================================================================

/// Response from the password grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: ResourceId,
}

#[derive(Debug, Default)]
struct SessionState {
    user_id: Option<ResourceId>,
    access_token: Option<String>,
}

impl SessionState {
    fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

// ============================================================================
// Session
// ============================================================================

/// An authenticated WHOOP session.
pub struct Session {
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
    endpoints: Endpoints,
    state: Mutex<SessionState>,
}

impl Session {
    /// Creates a session without logging in.
    ///
    /// The first call to [`Session::authorization_header`] performs the login.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Credentials,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            transport,
            credentials,
            endpoints,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Creates a session and logs in immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AuthenticationRejected`] if the credentials are
    /// refused, or a transport error.
    pub async fn login(
        transport: Arc<dyn HttpTransport>,
        credentials: Credentials,
        endpoints: Endpoints,
    ) -> Result<Self, FetchError> {
        let session = Self::new(transport, credentials, endpoints);
        session.authenticate().await?;
        Ok(session)
    }

    /// Logs in and replaces the stored user id and token.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AuthenticationRejected`] on any non-200 answer.
    pub async fn authenticate(&self) -> Result<(), FetchError> {
        let mut state = self.state.lock().await;
        self.authenticate_locked(&mut state).await
    }

    #[instrument(skip(self, state), fields(username = %self.credentials.username))]
    async fn authenticate_locked(&self, state: &mut SessionState) -> Result<(), FetchError> {
        debug!("Posting credentials");

        let request = ApiRequest::post(self.endpoints.url(Endpoint::Auth)).with_json(json!({
            "grant_type": "password",
            "issueRefresh": false,
            "password": self.credentials.password,
            "username": self.credentials.username,
        }));

        let response = self.transport.send(request).await?;

        if response.status != StatusCode::OK {
            warn!(status = %response.status, "Authentication failed");
            return Err(FetchError::AuthenticationRejected {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        let token: TokenResponse = response.json().map_err(|e| {
            warn!(error = %e, "Failed to parse token response");
            FetchError::InvalidResponse(format!("token response: {e}"))
        })?;

        info!(user_id = %token.user.id, "Successfully authenticated");

        state.user_id = Some(token.user.id);
        state.access_token = Some(token.access_token);
        Ok(())
    }

    /// Returns the `Authorization` header value, logging in first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a required login fails.
    pub async fn authorization_header(&self) -> Result<HeaderValue, FetchError> {
        let mut state = self.state.lock().await;
        if !state.has_token() {
            self.authenticate_locked(&mut state).await?;
        }
        bearer(&state)
    }

    /// Replaces a token that the API just rejected and returns a fresh header.
    ///
    /// If another caller already refreshed since `stale` was handed out, the
    /// current token is returned without logging in again.
    ///
    /// # Errors
    ///
    /// Returns an error if the login fails.
    pub async fn reauthenticate(&self, stale: &HeaderValue) -> Result<HeaderValue, FetchError> {
        let mut state = self.state.lock().await;

        let current = if state.has_token() {
            Some(bearer(&state)?)
        } else {
            None
        };

        if current.as_ref() == Some(stale) || current.is_none() {
            warn!("Token expired or invalid, refreshing");
            self.authenticate_locked(&mut state).await?;
        } else {
            debug!("Token already refreshed by another request");
        }

        bearer(&state)
    }

    /// Returns true if a response status means the token is stale.
    pub fn is_expired(status: StatusCode) -> bool {
        matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }

    /// Returns the vendor-assigned user id, logging in first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a required login fails.
    pub async fn user_id(&self) -> Result<ResourceId, FetchError> {
        let mut state = self.state.lock().await;
        if state.user_id.is_none() {
            self.authenticate_locked(&mut state).await?;
        }
        state
            .user_id
            .clone()
            .ok_or_else(|| FetchError::InvalidResponse("login returned no user id".to_string()))
    }

    /// Returns the endpoint table.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the transport used for every request.
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Returns the account username.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn bearer(state: &SessionState) -> Result<HeaderValue, FetchError> {
    let token = state.access_token.as_deref().unwrap_or_default();
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| FetchError::InvalidHeader(format!("Invalid token: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;
    use reqwest::Method;

    fn credentials() -> Credentials {
        Credentials::new("me@example.com", "hunter2").unwrap()
    }

    #[test]
    fn test_credentials_required() {
        assert!(matches!(
            Credentials::new("", "pw"),
            Err(FetchError::CredentialsMissing)
        ));
        assert!(matches!(
            Credentials::new("user", ""),
            Err(FetchError::CredentialsMissing)
        ));
        assert!(matches!(
            Credentials::from_parts(Some("user".into()), None),
            Err(FetchError::CredentialsMissing)
        ));
        assert!(Credentials::from_parts(Some("user".into()), Some("pw".into())).is_ok());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_is_expired() {
        assert!(Session::is_expired(StatusCode::UNAUTHORIZED));
        assert!(Session::is_expired(StatusCode::FORBIDDEN));
        assert!(!Session::is_expired(StatusCode::OK));
        assert!(!Session::is_expired(StatusCode::NOT_FOUND));
        assert!(!Session::is_expired(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_login_stores_token_and_user() {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Session::login(transport.clone(), credentials(), Endpoints::default())
            .await
            .unwrap();

        assert_eq!(transport.login_count(), 1);
        assert_eq!(session.user_id().await.unwrap(), ResourceId::Number(42));
        assert_eq!(
            session.authorization_header().await.unwrap(),
            "Bearer token-1"
        );
        // No second login once a token is held.
        assert_eq!(transport.login_count(), 1);
    }

    #[tokio::test]
    async fn test_login_request_shape() {
        let transport = Arc::new(ScriptedTransport::new());
        Session::login(transport.clone(), credentials(), Endpoints::default())
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);

        let login = &requests[0];
        assert_eq!(login.method, Method::POST);
        assert_eq!(login.url, "https://api-7.whoop.com/oauth/token");
        assert_eq!(
            login.json,
            Some(json!({
                "grant_type": "password",
                "issueRefresh": false,
                "password": "hunter2",
                "username": "me@example.com"
            }))
        );
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_auth(StatusCode::UNAUTHORIZED, r#"{"error":"invalid_grant"}"#);

        let result = Session::login(transport.clone(), credentials(), Endpoints::default()).await;

        match result {
            Err(FetchError::AuthenticationRejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("expected AuthenticationRejected, got {other:?}"),
        }
        // Rejection is not retried.
        assert_eq!(transport.login_count(), 1);
    }

    #[tokio::test]
    async fn test_login_with_malformed_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_auth(StatusCode::OK, r#"{"access_token": "t"}"#);

        let result = Session::login(transport, credentials(), Endpoints::default()).await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_lazy_session_logs_in_on_first_header() {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Session::new(transport.clone(), credentials(), Endpoints::default());
        assert_eq!(transport.login_count(), 0);

        let header = session.authorization_header().await.unwrap();
        assert_eq!(header, "Bearer token-1");
        assert!(header.is_sensitive());
        assert_eq!(transport.login_count(), 1);
    }

    #[tokio::test]
    async fn test_reauthenticate_replaces_stale_token() {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Session::login(transport.clone(), credentials(), Endpoints::default())
            .await
            .unwrap();

        let stale = session.authorization_header().await.unwrap();
        let fresh = session.reauthenticate(&stale).await.unwrap();

        assert_eq!(fresh, "Bearer token-2");
        assert_eq!(transport.login_count(), 2);
    }

    #[tokio::test]
    async fn test_reauthenticate_skips_when_already_refreshed() {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Session::login(transport.clone(), credentials(), Endpoints::default())
            .await
            .unwrap();

        let stale = session.authorization_header().await.unwrap();
        let first = session.reauthenticate(&stale).await.unwrap();
        // A second holder of the same stale header gets the fresh token.
        let second = session.reauthenticate(&stale).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.login_count(), 2);
    }
}
