//! Sleep stage summaries.

use serde::{Deserialize, Serialize};

/// Time spent in one sleep stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTotal {
    /// Stage name as reported by the vendor (`SWS`, `LIGHT`, `REM`, `WAKE`).
    pub stage: String,
    /// Total seconds in this stage.
    pub seconds: i64,
    /// Share of the summarized time, 0-100.
    pub percent: f64,
}

impl StageTotal {
    /// Formats the duration as `Xh Ym`.
    pub fn display_duration(&self) -> String {
        format_hours_minutes(self.seconds)
    }
}

/// Per-stage breakdown of one sleep event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    /// Stage totals in display order (deepest first).
    pub stages: Vec<StageTotal>,
    /// Sum of all stage durations in seconds.
    pub total_seconds: i64,
}

impl StageSummary {
    /// Returns the total for a stage, if it was present.
    pub fn get(&self, stage: &str) -> Option<&StageTotal> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Formats the total duration as `Xh Ym`.
    pub fn display_total(&self) -> String {
        format_hours_minutes(self.total_seconds)
    }

    /// Returns true if no stage time was recorded.
    pub fn is_empty(&self) -> bool {
        self.total_seconds == 0
    }
}

fn format_hours_minutes(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}
