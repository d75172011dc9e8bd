//! Domain models for `whoopdata`.
//!
//! Vendor payloads are modeled as typed structs where the shape is known and
//! kept as verbatim JSON where the output must reproduce the vendor record
//! unmodified.
//!
//! ## Submodules
//!
//! - [`id`] - Opaque vendor identifiers
//! - [`cycle`] - Cycle and sleep vow payloads
//! - [`heart_rate`] - Heart rate series and flattened points
//! - [`record`] - Flattened sleep and recovery records
//! - [`stage`] - Sleep stage summaries

mod cycle;
mod heart_rate;
mod id;
mod record;
mod stage;

pub use cycle::{Cycle, SleepSummary, SleepVow};
pub use heart_rate::{HeartRatePoint, HeartRateSeries};
pub use id::ResourceId;
pub use record::{RecoveryRecord, SleepRecord};
pub use stage::{StageSummary, StageTotal};
