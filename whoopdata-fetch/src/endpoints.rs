//! Fixed WHOOP API endpoints.
//!
//! All URLs used by the workspace live here so an API change is a one-line
//! edit. Base URLs can be swapped (e.g. for a local proxy) without touching
//! the paths.

use std::fmt;

use url::Url;

use crate::error::FetchError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the authentication service.
pub const AUTH_BASE: &str = "https://api-7.whoop.com";

/// Base URL of the data services.
pub const API_BASE: &str = "https://api.prod.whoop.com";

/// API version sent as the `apiVersion` query parameter.
pub const API_VERSION: &str = "7";

// ============================================================================
// Endpoint
// ============================================================================

/// A logical API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Password login.
    Auth,
    /// Full detail for one sleep activity.
    SleepEvent,
    /// Per-cycle sleep aggregate.
    SleepVow,
    /// Cycle aggregates over a time range.
    Cycles,
    /// Metrics time series (heart rate).
    HeartRate,
    /// Per-cycle recovery aggregate.
    RecoveryVow,
}

impl Endpoint {
    /// All endpoints.
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Auth,
        Endpoint::SleepEvent,
        Endpoint::SleepVow,
        Endpoint::Cycles,
        Endpoint::HeartRate,
        Endpoint::RecoveryVow,
    ];

    /// Path below the endpoint's base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Auth => "/oauth/token",
            Self::SleepEvent => "/sleep-service/v1/sleep-events/v1-passthrough",
            Self::SleepVow => "/vow-service/v1/vows/sleep/1d/cycle",
            Self::Cycles => "/activities-service/v1/cycles/aggregate/range",
            Self::HeartRate => "/metrics-service/v1/metrics/user",
            Self::RecoveryVow => "/vow-service/v1/vows/recovery/1d/cycle",
        }
    }

    /// Returns true if this endpoint lives on the auth host.
    pub fn is_auth(self) -> bool {
        matches!(self, Self::Auth)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::SleepEvent => "sleep_event",
            Self::SleepVow => "sleep_vow",
            Self::Cycles => "cycles",
            Self::HeartRate => "heart_rate",
            Self::RecoveryVow => "recovery_vow",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Endpoint Table
// ============================================================================

/// Resolves [`Endpoint`]s to fully qualified URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_base: String,
    api_base: String,
}

impl Endpoints {
    /// Creates the production endpoint table.
    pub fn new() -> Self {
        Self {
            auth_base: AUTH_BASE.to_string(),
            api_base: API_BASE.to_string(),
        }
    }

    /// Creates an endpoint table with custom base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if either base is not an absolute
    /// http(s) URL.
    pub fn with_bases(auth_base: &str, api_base: &str) -> Result<Self, FetchError> {
        Ok(Self {
            auth_base: normalize_base(auth_base)?,
            api_base: normalize_base(api_base)?,
        })
    }

    /// Returns the URL for an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        let base = if endpoint.is_auth() {
            &self.auth_base
        } else {
            &self.api_base
        };
        format!("{}{}", base, endpoint.path())
    }

    /// Returns the URL for an endpoint with a trailing path segment.
    pub fn url_for(&self, endpoint: Endpoint, segment: impl fmt::Display) -> String {
        format!("{}/{}", self.url(endpoint), segment)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base(base: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl(base.to_string()));
    }

    Ok(base.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_urls() {
        let endpoints = Endpoints::new();

        assert_eq!(
            endpoints.url(Endpoint::Auth),
            "https://api-7.whoop.com/oauth/token"
        );
        assert_eq!(
            endpoints.url_for(Endpoint::Cycles, 1234),
            "https://api.prod.whoop.com/activities-service/v1/cycles/aggregate/range/1234"
        );
        assert_eq!(
            endpoints.url_for(Endpoint::SleepVow, "c-9"),
            "https://api.prod.whoop.com/vow-service/v1/vows/sleep/1d/cycle/c-9"
        );
        assert_eq!(
            endpoints.url(Endpoint::SleepEvent),
            "https://api.prod.whoop.com/sleep-service/v1/sleep-events/v1-passthrough"
        );
        assert_eq!(
            endpoints.url_for(Endpoint::HeartRate, 1234),
            "https://api.prod.whoop.com/metrics-service/v1/metrics/user/1234"
        );
        assert_eq!(
            endpoints.url_for(Endpoint::RecoveryVow, 55),
            "https://api.prod.whoop.com/vow-service/v1/vows/recovery/1d/cycle/55"
        );
    }

    #[test]
    fn test_only_auth_uses_auth_host() {
        let endpoints = Endpoints::new();
        for endpoint in Endpoint::ALL {
            let url = endpoints.url(endpoint);
            assert_eq!(url.starts_with(AUTH_BASE), endpoint.is_auth(), "{endpoint}");
        }
    }

    #[test]
    fn test_custom_bases_trim_trailing_slash() {
        let endpoints =
            Endpoints::with_bases("http://127.0.0.1:8080/", "http://127.0.0.1:9090").unwrap();

        assert_eq!(
            endpoints.url(Endpoint::Auth),
            "http://127.0.0.1:8080/oauth/token"
        );
        assert_eq!(
            endpoints.url(Endpoint::Cycles),
            "http://127.0.0.1:9090/activities-service/v1/cycles/aggregate/range"
        );
    }

    #[test]
    fn test_invalid_bases_rejected() {
        assert!(Endpoints::with_bases("not a url", API_BASE).is_err());
        assert!(Endpoints::with_bases(AUTH_BASE, "ftp://example.com").is_err());
    }
}
