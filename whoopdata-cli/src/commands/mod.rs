//! CLI command implementations.

pub mod export;
pub mod stages;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;
use whoopdata_core::resolve_range;
use whoopdata_fetch::{RequestExecutor, ReqwestTransport, Session};
use whoopdata_store::{Settings, resolve_credentials};
use whoopdata_sync::WhoopApi;

use crate::Cli;

/// Loads settings and checks the date arguments before any network call.
pub async fn prepare(cli: &Cli) -> Result<Settings> {
    let settings = Settings::load(cli.settings.as_deref())
        .await
        .context("Failed to load settings")?;
    debug!(?settings, "Settings");

    // Fail on a bad date before logging in.
    resolve_range(cli.from_date.as_deref(), cli.to_date.as_deref())?;

    Ok(settings)
}

/// Resolves credentials, logs in and builds the API client.
pub async fn connect(cli: &Cli, settings: &Settings) -> Result<WhoopApi> {
    let credentials = resolve_credentials(cli.username.as_deref(), cli.password.as_deref())?;
    let endpoints = settings.endpoints()?;
    let transport = Arc::new(ReqwestTransport::with_timeout(settings.timeout())?);

    let session = Session::login(transport, credentials, endpoints)
        .await
        .context("Login failed")?;

    let executor = RequestExecutor::new(Arc::new(session))
        .with_retry_strategy(settings.retry_strategy())
        .with_api_version(settings.api_version.clone());

    Ok(WhoopApi::new(executor).with_cycle_limit(settings.cycle_limit))
}
