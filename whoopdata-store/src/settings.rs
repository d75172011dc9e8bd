//! User settings.
//!
//! Every field has a default, so a partial (or absent) settings file is
//! fine. Settings only tune requests and output; credentials never live here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use whoopdata_fetch::{Endpoints, RetryStrategy, endpoints::API_VERSION};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

/// Tunables for requests and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request when the token keeps expiring.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between re-authenticated attempts (0 = immediate).
    #[serde(default)]
    pub retry_base_delay_secs: u64,

    /// Value of the `apiVersion` query parameter.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Maximum cycles per cycles request.
    #[serde(default = "default_cycle_limit")]
    pub cycle_limit: u32,

    /// Heart rate sampling step in seconds.
    #[serde(default = "default_heart_rate_step")]
    pub heart_rate_step: u32,

    /// Directory export files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Auth host override (e.g. a local proxy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_base_url: Option<String>,

    /// Data host override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_cycle_limit() -> u32 {
    26
}

fn default_heart_rate_step() -> u32 {
    600
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_secs: 0,
            api_version: default_api_version(),
            cycle_limit: default_cycle_limit(),
            heart_rate_step: default_heart_rate_step(),
            output_dir: default_output_dir(),
            auth_base_url: None,
            api_base_url: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the default location when `None`.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// holds invalid values.
    pub async fn load(path: Option<&Path>) -> Result<Self, StoreError> {
        let path = path.map_or_else(default_settings_path, Path::to_path_buf);

        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let settings: Self = load_json(&path).await?;
        settings.validate()?;

        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Saves settings to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await
    }

    /// Checks values that would make every request fail.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] describing the first bad value.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be positive".into()));
        }
        if self.max_retries == 0 {
            return Err(StoreError::Config("max_retries must be at least 1".into()));
        }
        if self.cycle_limit == 0 {
            return Err(StoreError::Config("cycle_limit must be positive".into()));
        }
        if self.heart_rate_step == 0 {
            return Err(StoreError::Config("heart_rate_step must be positive".into()));
        }
        if self.api_version.trim().is_empty() {
            return Err(StoreError::Config("api_version must not be empty".into()));
        }
        Ok(())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry strategy for the request executor.
    pub fn retry_strategy(&self) -> RetryStrategy {
        RetryStrategy::new(self.max_retries).with_base_delay(self.retry_base_delay_secs)
    }

    /// Endpoint table, honoring host overrides.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if an override is not a valid URL.
    pub fn endpoints(&self) -> Result<Endpoints, StoreError> {
        if self.auth_base_url.is_none() && self.api_base_url.is_none() {
            return Ok(Endpoints::default());
        }

        let auth = self
            .auth_base_url
            .as_deref()
            .unwrap_or(whoopdata_fetch::endpoints::AUTH_BASE);
        let api = self
            .api_base_url
            .as_deref()
            .unwrap_or(whoopdata_fetch::endpoints::API_BASE);

        Endpoints::with_bases(auth, api).map_err(|e| StoreError::Config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
