//! Heart rate series types.
//!
//! Samples are kept as raw JSON values. The metrics service may return
//! averaged (fractional) samples, `null` gaps, or string timestamps, and all
//! of those are copied through to the export unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw heart rate metrics payload: two parallel arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeartRateSeries {
    /// Sample timestamps (usually epoch milliseconds).
    #[serde(default)]
    pub times: Option<Vec<Value>>,

    /// Heart rate samples in beats per minute.
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

/// A single flattened heart rate sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRatePoint {
    /// Sample timestamp as sent by the vendor.
    pub timestamp: Value,
    /// Sample value as sent by the vendor; may be fractional or `null`.
    pub heart_rate: Value,
}

impl HeartRatePoint {
    /// Creates a new point.
    pub fn new(timestamp: impl Into<Value>, heart_rate: impl Into<Value>) -> Self {
        Self {
            timestamp: timestamp.into(),
            heart_rate: heart_rate.into(),
        }
    }
}
