//! Cycle to sleep event fan-out.
//!
//! Lists the cycles in a date range, fetches each cycle's sleep vow, then the
//! full event for every sleep the vow lists. Each event becomes one
//! [`SleepRecord`] tagged with its cycle. A cycle whose vow cannot be fetched
//! is skipped and reported; a failing cycles or event request aborts the run.

use tracing::{debug, info, instrument, warn};
use whoopdata_core::{Cycle, SleepRecord, resolve_range};

use crate::api::{WhoopApi, is_empty_payload};
use crate::error::SyncError;
use crate::report::{SkippedItem, SyncReport};

/// Fetch every sleep event between two calendar dates.
///
/// Dates are `YYYY-MM-DD`; when either is missing the trailing seven days
/// are used.
///
/// # Errors
///
/// Returns an error if a date is malformed, the cycles request fails, or a
/// sleep event request fails.
#[instrument(skip(api))]
pub async fn get_sleep_data(
    api: &WhoopApi,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<SyncReport<SleepRecord>, SyncError> {
    let range = resolve_range(start, end)?;
    debug!(start = %range.start, end = %range.end, "Resolved date range");

    let cycles = api
        .get_cycles(&range.start, &range.end, api.cycle_limit())
        .await?;
    info!(count = cycles.len(), "Fetched cycles");

    collect_sleep_records(api, &cycles).await
}

/// Fan out over already-fetched cycles.
///
/// # Errors
///
/// Returns an error if a sleep event request fails.
pub async fn collect_sleep_records(
    api: &WhoopApi,
    cycles: &[Cycle],
) -> Result<SyncReport<SleepRecord>, SyncError> {
    let mut report = SyncReport::new();

    for cycle in cycles {
        let Some(cycle_id) = cycle.id.as_ref().filter(|id| !id.is_empty()) else {
            warn!(date = ?cycle.day, "Cycle has no id, skipping");
            report
                .skipped
                .push(SkippedItem::new(None, cycle.day.clone(), "cycle has no id"));
            continue;
        };

        let vow = match api.get_sleep_vow(cycle_id).await {
            Ok(vow) => vow,
            Err(e) => {
                warn!(cycle_id = %cycle_id, error = %e, "Error processing cycle");
                report.skipped.push(SkippedItem::new(
                    Some(cycle_id.clone()),
                    cycle.day.clone(),
                    e.to_string(),
                ));
                continue;
            }
        };

        for activity_id in vow.activity_ids() {
            let event = api.get_sleep_event(activity_id).await?;
            if is_empty_payload(&event) {
                debug!(activity_id = %activity_id, "Empty sleep event, skipping");
                continue;
            }

            report.records.push(SleepRecord {
                date: cycle.day.clone(),
                cycle_id: cycle_id.clone(),
                activity_id: activity_id.clone(),
                data: event,
            });
        }
    }

    info!(
        records = report.len(),
        skipped = report.skipped.len(),
        "Collected sleep records"
    );
    Ok(report)
}
