// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `whoopdata` Core
//!
//! Core types, models, and date handling for the `whoopdata` workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! `whoopdata` crates, including:
//!
//! - Vendor payload models (cycles, sleep vows, heart rate series)
//! - Flattened output records written to disk
//! - The date-range normalizer used by every time-bounded request
//! - Error types
//!
//! ## Key Types
//!
//! ### Vendor Payloads
//! - [`Cycle`] - One calendar day's physiological aggregate
//! - [`SleepVow`] - Per-cycle sleep aggregate listing sleep activities
//! - [`HeartRateSeries`] - Parallel `times`/`values` arrays
//!
//! ### Output Records
//! - [`SleepRecord`] - One sleep activity tagged with its cycle
//! - [`RecoveryRecord`] - One cycle's recovery payload
//! - [`HeartRatePoint`] - One sampled heart rate value
//! - [`StageSummary`] - Time spent in each sleep stage
//!
//! ### Dates
//! - [`DateRange`] - Normalized `[start, end]` timestamp strings
//! - [`format_date`] / [`resolve_range`] - Normalization helpers

pub mod date_range;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export date handling
pub use date_range::{DateRange, format_date, resolve_range, resolve_range_at};

// Re-export all model types
pub use models::{
    // Identifiers
    ResourceId,
    // Vendor payloads
    Cycle,
    HeartRateSeries,
    SleepSummary,
    SleepVow,
    // Output records
    HeartRatePoint,
    RecoveryRecord,
    SleepRecord,
    StageSummary,
    StageTotal,
};
