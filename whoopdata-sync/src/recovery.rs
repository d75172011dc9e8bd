//! Cycle to recovery vow fan-out.

use tracing::{debug, info, instrument, warn};
use whoopdata_core::{Cycle, RecoveryRecord, resolve_range};

use crate::api::{WhoopApi, is_empty_payload};
use crate::error::SyncError;
use crate::report::{SkippedItem, SyncReport};

/// Fetch the recovery vow of every cycle between two calendar dates.
///
/// # Errors
///
/// Returns an error if a date is malformed or the cycles request fails.
#[instrument(skip(api))]
pub async fn get_recovery_data(
    api: &WhoopApi,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<SyncReport<RecoveryRecord>, SyncError> {
    let range = resolve_range(start, end)?;
    debug!(start = %range.start, end = %range.end, "Resolved date range");

    let cycles = api
        .get_cycles(&range.start, &range.end, api.cycle_limit())
        .await?;
    info!(count = cycles.len(), "Fetched cycles");

    Ok(collect_recovery_records(api, &cycles).await)
}

/// Fan out over already-fetched cycles. Per-cycle failures are reported,
/// never raised.
pub async fn collect_recovery_records(
    api: &WhoopApi,
    cycles: &[Cycle],
) -> SyncReport<RecoveryRecord> {
    let mut report = SyncReport::new();

    for cycle in cycles {
        let Some(cycle_id) = cycle.id.as_ref().filter(|id| !id.is_empty()) else {
            warn!(date = ?cycle.day, "Cycle has no id, skipping");
            report
                .skipped
                .push(SkippedItem::new(None, cycle.day.clone(), "cycle has no id"));
            continue;
        };

        match api.get_recovery_vow(cycle_id).await {
            Ok(data) if is_empty_payload(&data) => {
                debug!(cycle_id = %cycle_id, "Empty recovery vow, skipping");
            }
            Ok(data) => report.records.push(RecoveryRecord {
                date: cycle.day.clone(),
                cycle_id: cycle_id.clone(),
                data,
            }),
            Err(e) => {
                warn!(cycle_id = %cycle_id, error = %e, "Error processing cycle");
                report.skipped.push(SkippedItem::new(
                    Some(cycle_id.clone()),
                    cycle.day.clone(),
                    e.to_string(),
                ));
            }
        }
    }

    info!(
        records = report.len(),
        skipped = report.skipped.len(),
        "Collected recovery records"
    );
    report
}
