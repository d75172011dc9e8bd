//! Export files.
//!
//! Each export is one pretty-printed JSON array named after its data kind
//! and the local time it was written, e.g. `sleep_data_20230107_213000.json`.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::error::StoreError;
use crate::persistence::save_json;

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Kind of exported data; picks the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Flattened sleep events.
    Sleep,
    /// Heart rate samples.
    HeartRate,
    /// Recovery vows.
    Recovery,
}

impl ExportKind {
    /// Short machine name (`sleep`, `heart_rate`, `recovery`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::HeartRate => "heart_rate",
            Self::Recovery => "recovery",
        }
    }

    /// File name prefix.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Sleep => "sleep_data",
            Self::HeartRate => "heart_rate_data",
            Self::Recovery => "recovery_data",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sleep => "sleep",
            Self::HeartRate => "heart rate",
            Self::Recovery => "recovery",
        };
        f.write_str(name)
    }
}

/// Returns the export path for `kind` written at `now`.
pub fn export_path(dir: &Path, kind: ExportKind, now: NaiveDateTime) -> PathBuf {
    dir.join(format!(
        "{}_{}.json",
        kind.file_prefix(),
        now.format(FILE_TIMESTAMP_FORMAT)
    ))
}

/// Inserts the kind slug before the extension: `out.json` -> `out_sleep.json`.
///
/// Used when one explicit output path is shared by several exports.
pub fn with_kind_suffix(path: &Path, kind: ExportKind) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{}.{}", kind.slug(), ext.to_string_lossy()),
        None => format!("{stem}_{}", kind.slug()),
    };
    path.with_file_name(file_name)
}

/// Writes records to a timestamped file in `dir`.
///
/// Returns `None` without touching the filesystem when there are no records.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_export<T: Serialize>(
    dir: &Path,
    kind: ExportKind,
    records: &[T],
) -> Result<Option<PathBuf>, StoreError> {
    write_export_at(dir, kind, records, Local::now().naive_local()).await
}

/// Like [`write_export`] with a fixed clock.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_export_at<T: Serialize>(
    dir: &Path,
    kind: ExportKind,
    records: &[T],
    now: NaiveDateTime,
) -> Result<Option<PathBuf>, StoreError> {
    write_export_to(&export_path(dir, kind, now), kind, records).await
}

/// Writes records to an explicit file path.
///
/// Returns `None` without touching the filesystem when there are no records.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[instrument(skip(records), fields(count = records.len()))]
pub async fn write_export_to<T: Serialize>(
    path: &Path,
    kind: ExportKind,
    records: &[T],
) -> Result<Option<PathBuf>, StoreError> {
    if records.is_empty() {
        info!(kind = %kind, "No records, nothing written");
        return Ok(None);
    }

    save_json(path, records).await?;

    info!(kind = %kind, path = %path.display(), count = records.len(), "Saved export");
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use whoopdata_core::HeartRatePoint;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 7)
            .unwrap()
            .and_hms_opt(21, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_export_path() {
        let path = export_path(Path::new("output"), ExportKind::HeartRate, at());
        assert_eq!(path, PathBuf::from("output/heart_rate_data_20230107_213005.json"));

        let path = export_path(Path::new("out"), ExportKind::Sleep, at());
        assert!(path.ends_with("sleep_data_20230107_213005.json"));

        let path = export_path(Path::new("out"), ExportKind::Recovery, at());
        assert!(path.ends_with("recovery_data_20230107_213005.json"));
    }

    #[tokio::test]
    async fn test_write_export_creates_dir_and_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("output");
        let points = vec![HeartRatePoint::new(1, 60), HeartRatePoint::new(2, 61)];

        let path = write_export_at(&dir, ExportKind::HeartRate, &points, at())
            .await
            .unwrap()
            .unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains('\n'));

        let back: Vec<HeartRatePoint> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, points);
    }

    #[test]
    fn test_with_kind_suffix() {
        assert_eq!(
            with_kind_suffix(Path::new("exports/data.json"), ExportKind::HeartRate),
            PathBuf::from("exports/data_heart_rate.json")
        );
        assert_eq!(
            with_kind_suffix(Path::new("data"), ExportKind::Sleep),
            PathBuf::from("data_sleep")
        );
    }

    #[tokio::test]
    async fn test_write_export_to_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");

        let written = write_export_to(&path, ExportKind::Recovery, &[serde_json::json!({"a": 1})])
            .await
            .unwrap();

        assert_eq!(written, Some(path.clone()));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_empty_records_write_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("output");
        let records: Vec<HeartRatePoint> = Vec::new();

        let written = write_export_at(&dir, ExportKind::Sleep, &records, at())
            .await
            .unwrap();

        assert!(written.is_none());
        assert!(!dir.exists());
    }
}
