// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # whoopdata Sync
//!
//! Typed WHOOP accessors and the pipelines built on them.
//!
//! | Pipeline | Requests | Output |
//! |----------|----------|--------|
//! | [`get_sleep_data`] | cycles, sleep vow per cycle, sleep event per sleep | [`SleepRecord`](whoopdata_core::SleepRecord) |
//! | [`get_recovery_data`] | cycles, recovery vow per cycle | [`RecoveryRecord`](whoopdata_core::RecoveryRecord) |
//! | [`get_heart_rate_data`] | one metrics series | [`HeartRatePoint`](whoopdata_core::HeartRatePoint) |
//!
//! All requests are awaited one after another. Cycles whose vow cannot be
//! fetched are listed in [`SyncReport::skipped`] instead of failing the run.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use whoopdata_fetch::{Credentials, Endpoints, ReqwestTransport};
//! use whoopdata_sync::{WhoopApi, get_sleep_data};
//!
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let credentials = Credentials::new("me@example.com", "secret")?;
//! let api = WhoopApi::connect(transport, credentials, Endpoints::default()).await?;
//!
//! let report = get_sleep_data(&api, Some("2023-01-01"), Some("2023-01-07")).await?;
//! ```

pub mod api;
pub mod error;
pub mod heart_rate;
pub mod recovery;
pub mod report;
pub mod sleep;
pub mod stages;

#[cfg(test)]
mod test_support;

// Re-export key types
pub use api::{DEFAULT_CYCLE_LIMIT, DEFAULT_HEART_RATE_STEP, WhoopApi, is_empty_payload};
pub use error::SyncError;
pub use report::{SkippedItem, SyncReport};

// Re-export pipelines
pub use heart_rate::{flatten_series, get_heart_rate_data};
pub use recovery::{collect_recovery_records, get_recovery_data};
pub use sleep::{collect_sleep_records, get_sleep_data};
pub use stages::{SLEEP_STAGES, summarize_stages};
