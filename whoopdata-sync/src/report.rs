//! Pipeline results.

use serde::{Deserialize, Serialize};
use whoopdata_core::ResourceId;

/// A cycle the pipeline could not process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Cycle id, if the cycle carried one.
    pub cycle_id: Option<ResourceId>,
    /// Day label of the cycle.
    pub date: Option<String>,
    /// Why the cycle was skipped.
    pub reason: String,
}

impl SkippedItem {
    /// Creates a skipped item.
    pub fn new(
        cycle_id: Option<ResourceId>,
        date: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            cycle_id,
            date,
            reason: reason.into(),
        }
    }
}

/// Records produced by a fan-out pipeline plus the cycles it skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport<T> {
    /// Output records, in cycle order.
    pub records: Vec<T>,
    /// Cycles skipped along the way.
    pub skipped: Vec<SkippedItem>,
}

impl<T> SyncReport<T> {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns true if no records were produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records produced.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if any cycle was skipped.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl<T> Default for SyncReport<T> {
    fn default() -> Self {
        Self::new()
    }
}
