//! Sleep stage totals from a sleep event payload.
//!
//! A sleep event is a list of stage entries shaped like
//! `{"type": "REM", "during": "['2023-01-01T02:00:00.000Z','2023-01-01T02:30:00.000Z')"}`.
//! Some payloads wrap the list as `{"stages": [...]}`; both are accepted.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use whoopdata_core::{StageSummary, StageTotal};

use crate::error::SyncError;

/// Stages in display order.
pub const SLEEP_STAGES: [&str; 4] = ["SWS", "LIGHT", "REM", "WAKE"];

/// Entry types that are not sleep phases.
const IGNORED_TYPES: [&str; 2] = ["LATENCY", "DISTURBANCES"];

const STAGE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Sums the time spent in each sleep stage.
///
/// Unknown stage types are counted under their own name after the known
/// stages.
///
/// # Errors
///
/// Returns [`SyncError::MalformedStage`] if the payload is not a stage list
/// or an entry lacks a readable `type`/`during` pair.
pub fn summarize_stages(event: &Value) -> Result<StageSummary, SyncError> {
    let entries = stage_entries(event)?;

    let mut totals: Vec<(String, i64)> = SLEEP_STAGES
        .iter()
        .map(|stage| ((*stage).to_string(), 0))
        .collect();

    for entry in entries {
        let kind = entry
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::MalformedStage(format!("missing type in {entry}")))?;

        if IGNORED_TYPES.contains(&kind) {
            continue;
        }

        let during = entry
            .get("during")
            .and_then(Value::as_str)
            .ok_or_else(|| SyncError::MalformedStage(format!("missing during for {kind}")))?;
        let seconds = during_seconds(during)?;

        match totals.iter_mut().find(|(stage, _)| stage == kind) {
            Some((_, total)) => *total += seconds,
            None => totals.push((kind.to_string(), seconds)),
        }
    }

    let total_seconds: i64 = totals.iter().map(|(_, s)| s).sum();

    let stages = totals
        .into_iter()
        .filter(|(stage, seconds)| *seconds > 0 || SLEEP_STAGES.contains(&stage.as_str()))
        .map(|(stage, seconds)| StageTotal {
            percent: percent_of(seconds, total_seconds),
            stage,
            seconds,
        })
        .collect();

    Ok(StageSummary {
        stages,
        total_seconds,
    })
}

fn stage_entries(event: &Value) -> Result<&Vec<Value>, SyncError> {
    match event {
        Value::Array(entries) => Ok(entries),
        Value::Object(map) => map
            .get("stages")
            .and_then(Value::as_array)
            .ok_or_else(|| SyncError::MalformedStage("payload has no stage list".to_string())),
        other => Err(SyncError::MalformedStage(format!(
            "expected a stage list, got {other}"
        ))),
    }
}

/// Parses a `['start','end')` range literal into its length in seconds.
fn during_seconds(during: &str) -> Result<i64, SyncError> {
    let malformed = || SyncError::MalformedStage(during.to_string());

    let inner = during
        .trim()
        .strip_prefix("['")
        .and_then(|s| s.strip_suffix("')"))
        .ok_or_else(malformed)?;
    let (start, end) = inner.split_once("','").ok_or_else(malformed)?;

    let start = parse_stage_time(start).ok_or_else(malformed)?;
    let end = parse_stage_time(end).ok_or_else(malformed)?;

    let seconds = (end - start).num_seconds();
    if seconds < 0 {
        return Err(malformed());
    }
    Ok(seconds)
}

fn parse_stage_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STAGE_TIME_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(seconds: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        seconds as f64 / total as f64 * 100.0
    }
}
