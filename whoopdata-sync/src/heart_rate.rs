//! Heart rate series flattening.

use tracing::{debug, info, instrument};
use whoopdata_core::{HeartRatePoint, HeartRateSeries, resolve_range};

use crate::api::WhoopApi;
use crate::error::SyncError;

/// Default sampling step in seconds.
pub const DEFAULT_STEP_SECS: u32 = crate::api::DEFAULT_HEART_RATE_STEP;

/// Fetch heart rate samples between two calendar dates.
///
/// Dates are `YYYY-MM-DD`; when either is missing the trailing seven days
/// are used. `step` is the sampling interval in seconds.
///
/// # Errors
///
/// Returns an error if a date is malformed or the metrics request fails.
#[instrument(skip(api))]
pub async fn get_heart_rate_data(
    api: &WhoopApi,
    start: Option<&str>,
    end: Option<&str>,
    step: u32,
) -> Result<Vec<HeartRatePoint>, SyncError> {
    let range = resolve_range(start, end)?;
    debug!(start = %range.start, end = %range.end, "Resolved date range");

    let series = api.get_heart_rate(&range.start, &range.end, step).await?;
    let points = flatten_series(&series);

    info!(count = points.len(), "Flattened heart rate series");
    Ok(points)
}

/// Zips the parallel `times`/`values` arrays into points.
///
/// Returns nothing when `values` is absent. Timestamps beyond the end of
/// `values` are dropped. Elements are copied as-is, `null` gaps included.
pub fn flatten_series(series: &HeartRateSeries) -> Vec<HeartRatePoint> {
    let Some(values) = series.values.as_deref() else {
        return Vec::new();
    };
    let times = series.times.as_deref().unwrap_or_default();

    times
        .iter()
        .zip(values)
        .map(|(timestamp, heart_rate)| {
            HeartRatePoint::new(timestamp.clone(), heart_rate.clone())
        })
        .collect()
}
