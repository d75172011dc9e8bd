//! Integration tests for core model types.

use whoopdata_core::{
    DateRange, StageSummary, StageTotal, format_date, resolve_range,
};

#[test]
fn test_explicit_range_roundtrip() {
    let range = resolve_range(Some("2023-01-01"), Some("2023-01-07")).unwrap();
    assert_eq!(
        range,
        DateRange::new("2023-01-01T00:00:00.000Z", "2023-01-07T23:59:59.999Z")
    );

    let json = serde_json::to_string(&range).unwrap();
    let parsed: DateRange = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, range);
}

#[test]
fn test_format_date_shape() {
    let formatted = format_date("2021-07-04").unwrap();
    assert_eq!(formatted.len(), "YYYY-MM-DDT00:00:00.000Z".len());
    assert!(formatted.ends_with("T00:00:00.000Z"));
}

#[test]
fn test_stage_summary_display() {
    let summary = StageSummary {
        stages: vec![StageTotal {
            stage: "REM".to_string(),
            seconds: 5_400,
            percent: 100.0,
        }],
        total_seconds: 5_400,
    };

    assert_eq!(summary.display_total(), "1h 30m");
    assert_eq!(summary.get("REM").unwrap().display_duration(), "1h 30m");
    assert!(summary.get("SWS").is_none());
    assert!(!summary.is_empty());
    assert!(StageSummary::default().is_empty());
}
