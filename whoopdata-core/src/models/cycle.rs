//! Cycle and sleep vow payloads.
//!
//! A cycle is the vendor's unit of one physiological day. Sub-payloads the
//! workspace never inspects are kept as raw JSON so they round-trip into the
//! output file untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ResourceId;

// ============================================================================
// Cycle
// ============================================================================

/// One entry of the cycles aggregate range response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cycle {
    /// Cycle id, used to look up per-cycle vows.
    #[serde(default)]
    pub id: Option<ResourceId>,

    /// Day label (e.g. `2023-01-01`).
    #[serde(default)]
    pub day: Option<String>,

    /// Recovery sub-payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Value>,

    /// Strain sub-payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<Value>,

    /// Sleep summary sub-payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<Value>,

    /// Any other fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cycle {
    /// Creates a cycle with the given id and day.
    pub fn new(id: impl Into<ResourceId>, day: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            day: Some(day.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Sleep Vow
// ============================================================================

/// Per-cycle sleep aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepVow {
    /// Sleep activities recorded in the cycle (may be `null`).
    #[serde(default)]
    pub sleeps: Option<Vec<SleepSummary>>,

    /// Any other fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SleepVow {
    /// Returns the listed sleep activities, treating `null` as none.
    pub fn sleeps(&self) -> &[SleepSummary] {
        self.sleeps.as_deref().unwrap_or_default()
    }

    /// Returns the ids of all sleep activities that carry one.
    pub fn activity_ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.sleeps()
            .iter()
            .filter_map(|s| s.id.as_ref())
            .filter(|id| !id.is_empty())
    }
}

/// One sleep activity listed in a [`SleepVow`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepSummary {
    /// Activity id used to fetch the full sleep event.
    #[serde(default)]
    pub id: Option<ResourceId>,

    /// Any other fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
