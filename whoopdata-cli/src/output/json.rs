//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use whoopdata_core::{ResourceId, SleepRecord, StageSummary};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a stage summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagesOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'a str>,
    pub cycle_id: &'a ResourceId,
    pub activity_id: &'a ResourceId,
    pub total_seconds: i64,
    pub stages: Vec<StageOutput<'a>>,
}

/// A single stage entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutput<'a> {
    pub stage: &'a str,
    pub seconds: i64,
    pub percent: f64,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the stage summary of one sleep.
    pub fn format_stages(&self, record: &SleepRecord, summary: &StageSummary) -> Result<String> {
        self.format(&stages_output(record, summary))
    }
}

/// Builds the JSON view of a stage summary.
pub fn stages_output<'a>(record: &'a SleepRecord, summary: &'a StageSummary) -> StagesOutput<'a> {
    StagesOutput {
        date: record.date.as_deref(),
        cycle_id: &record.cycle_id,
        activity_id: &record.activity_id,
        total_seconds: summary.total_seconds,
        stages: summary
            .stages
            .iter()
            .map(|s| StageOutput {
                stage: &s.stage,
                seconds: s.seconds,
                percent: round_percent(s.percent),
            })
            .collect(),
    }
}

fn round_percent(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}
