//! Flattened records written to the output file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::ResourceId;

/// One sleep activity, tagged with the cycle it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Day label of the owning cycle.
    pub date: Option<String>,
    /// Owning cycle id.
    pub cycle_id: ResourceId,
    /// Sleep activity id.
    pub activity_id: ResourceId,
    /// Full sleep event payload, unmodified.
    pub data: Value,
}

/// One cycle's recovery payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    /// Day label of the cycle.
    pub date: Option<String>,
    /// Cycle id.
    pub cycle_id: ResourceId,
    /// Full recovery vow payload, unmodified.
    pub data: Value,
}
