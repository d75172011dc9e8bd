//! Date-range normalization for time-bounded API requests.
//!
//! The vendor expects ISO-8601 timestamps with millisecond precision and a
//! `Z` suffix. Callers supply plain calendar dates (`YYYY-MM-DD`); this module
//! widens them to full-day bounds, or falls back to a trailing seven-day
//! window ending now.
//!
//! The default window renders the local wall-clock time with a literal `Z`.
//! This is not a real UTC conversion; downstream consumers rely on it.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Input format for caller-supplied dates.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Output format expected by the vendor API.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Start-of-day suffix produced by [`format_date`].
const START_OF_DAY: &str = "00:00:00.000Z";

/// End-of-day suffix substituted into the end bound.
const END_OF_DAY: &str = "23:59:59.999Z";

/// Width of the default trailing window.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// A normalized `[start, end]` pair of vendor timestamp strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive start timestamp.
    pub start: String,
    /// Inclusive end timestamp.
    pub end: String,
}

impl DateRange {
    /// Creates a range from already-formatted timestamps.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns the default trailing window ending at `now`.
    pub fn trailing_week(now: NaiveDateTime) -> Self {
        let start = now - TimeDelta::days(DEFAULT_WINDOW_DAYS);
        Self::new(
            start.format(TIMESTAMP_FORMAT).to_string(),
            now.format(TIMESTAMP_FORMAT).to_string(),
        )
    }
}

/// Formats a `YYYY-MM-DD` date as `YYYY-MM-DDT00:00:00.000Z`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateFormat`] if the input does not parse.
pub fn format_date(date: &str) -> Result<String, CoreError> {
    let parsed = NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
        .map_err(|_| CoreError::InvalidDateFormat(date.to_string()))?;

    Ok(parsed
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .format(TIMESTAMP_FORMAT)
        .to_string())
}

/// Resolves an optional pair of calendar dates against the local clock.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateFormat`] if a supplied date is malformed.
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, CoreError> {
    resolve_range_at(start, end, Local::now().naive_local())
}

/// Resolves an optional pair of calendar dates against a fixed clock.
///
/// When both dates are present, each is formatted with [`format_date`] and the
/// end bound's `00:00:00.000Z` text is rewritten to `23:59:59.999Z`. When
/// either is missing (or empty), the trailing seven-day window ending at
/// `now` is returned instead.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateFormat`] if a supplied date is malformed.
pub fn resolve_range_at(
    start: Option<&str>,
    end: Option<&str>,
    now: NaiveDateTime,
) -> Result<DateRange, CoreError> {
    match (non_empty(start), non_empty(end)) {
        (Some(start), Some(end)) => {
            let start = format_date(start)?;
            let end = format_date(end)?.replace(START_OF_DAY, END_OF_DAY);
            Ok(DateRange::new(start, end))
        }
        _ => Ok(DateRange::trailing_week(now)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
