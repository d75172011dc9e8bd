//! Typed WHOOP API accessors.
//!
//! Each accessor is a thin wrapper over [`RequestExecutor::execute`]: it
//! builds the URL and query for one endpoint, checks for a 200, and decodes
//! the body. Token refresh and retry live entirely in the executor.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use whoopdata_core::{Cycle, HeartRateSeries, ResourceId, SleepVow};
use whoopdata_fetch::{
    ApiResponse, Credentials, Endpoint, Endpoints, HttpTransport, RequestExecutor, Session,
};

use crate::error::SyncError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum cycles returned by one cycles request.
pub const DEFAULT_CYCLE_LIMIT: u32 = 26;

/// Default heart rate sampling step in seconds.
pub const DEFAULT_HEART_RATE_STEP: u32 = 600;

/// Metric name for the heart rate series.
const HEART_RATE_METRIC: &str = "heart_rate";

/// Sort order for the metrics series (by time).
const METRIC_ORDER: &str = "t";

// ============================================================================
// API Client
// ============================================================================

/// WHOOP API client.
#[derive(Debug, Clone)]
pub struct WhoopApi {
    executor: RequestExecutor,
    cycle_limit: u32,
}

impl WhoopApi {
    /// Creates a client over an executor.
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            cycle_limit: DEFAULT_CYCLE_LIMIT,
        }
    }

    /// Logs in and creates a client with default retry settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the login fails.
    pub async fn connect(
        transport: Arc<dyn HttpTransport>,
        credentials: Credentials,
        endpoints: Endpoints,
    ) -> Result<Self, SyncError> {
        let session = Session::login(transport, credentials, endpoints).await?;
        Ok(Self::new(RequestExecutor::new(Arc::new(session))))
    }

    /// Sets the cycle limit used by the pipelines.
    pub fn with_cycle_limit(mut self, limit: u32) -> Self {
        self.cycle_limit = limit;
        self
    }

    /// Returns the cycle limit used by the pipelines.
    pub fn cycle_limit(&self) -> u32 {
        self.cycle_limit
    }

    /// Returns the underlying executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    fn endpoints(&self) -> &Endpoints {
        self.executor.session().endpoints()
    }

    /// Fetch cycles between two vendor timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::CyclesFetchFailed`] on a non-200 answer.
    #[instrument(skip(self))]
    pub async fn get_cycles(
        &self,
        start: &str,
        end: &str,
        limit: u32,
    ) -> Result<Vec<Cycle>, SyncError> {
        debug!("Fetching cycles");

        let user_id = self.executor.session().user_id().await?;
        let url = self.endpoints().url_for(Endpoint::Cycles, user_id);
        let query = vec![
            ("startTime".to_string(), start.to_string()),
            ("endTime".to_string(), end.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        let response = self.executor.get(&url, query).await?;
        let response = expect_ok(response, |status, body| SyncError::CyclesFetchFailed {
            status,
            body,
        })?;
        decode(&response, Endpoint::Cycles)
    }

    /// Fetch the sleep vow for one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SleepVowFetchFailed`] on a non-200 answer.
    #[instrument(skip(self), fields(cycle_id = %cycle_id))]
    pub async fn get_sleep_vow(&self, cycle_id: &ResourceId) -> Result<SleepVow, SyncError> {
        debug!("Fetching sleep vow");

        let url = self.endpoints().url_for(Endpoint::SleepVow, cycle_id);
        let response = self.executor.get(&url, Vec::new()).await?;
        let response = expect_ok(response, |status, body| SyncError::SleepVowFetchFailed {
            status,
            body,
        })?;
        decode(&response, Endpoint::SleepVow)
    }

    /// Fetch the full sleep event for one activity.
    ///
    /// The payload is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SleepEventFetchFailed`] on a non-200 answer.
    #[instrument(skip(self), fields(activity_id = %activity_id))]
    pub async fn get_sleep_event(&self, activity_id: &ResourceId) -> Result<Value, SyncError> {
        debug!("Fetching sleep event");

        let url = self.endpoints().url(Endpoint::SleepEvent);
        let query = vec![("activityId".to_string(), activity_id.to_string())];

        let response = self.executor.get(&url, query).await?;
        let response = expect_ok(response, |status, body| SyncError::SleepEventFetchFailed {
            status,
            body,
        })?;
        decode(&response, Endpoint::SleepEvent)
    }

    /// Fetch the heart rate series between two vendor timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::HeartRateFetchFailed`] on a non-200 answer.
    #[instrument(skip(self))]
    pub async fn get_heart_rate(
        &self,
        start: &str,
        end: &str,
        step: u32,
    ) -> Result<HeartRateSeries, SyncError> {
        debug!("Fetching heart rate");

        let user_id = self.executor.session().user_id().await?;
        let url = self.endpoints().url_for(Endpoint::HeartRate, user_id);
        let query = vec![
            ("start".to_string(), start.to_string()),
            ("end".to_string(), end.to_string()),
            ("name".to_string(), HEART_RATE_METRIC.to_string()),
            ("order".to_string(), METRIC_ORDER.to_string()),
            ("step".to_string(), step.to_string()),
        ];

        let response = self.executor.get(&url, query).await?;
        let response = expect_ok(response, |status, body| SyncError::HeartRateFetchFailed {
            status,
            body,
        })?;
        decode(&response, Endpoint::HeartRate)
    }

    /// Fetch the recovery vow for one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::RecoveryFetchFailed`] on a non-200 answer.
    #[instrument(skip(self), fields(cycle_id = %cycle_id))]
    pub async fn get_recovery_vow(&self, cycle_id: &ResourceId) -> Result<Value, SyncError> {
        debug!("Fetching recovery vow");

        let url = self.endpoints().url_for(Endpoint::RecoveryVow, cycle_id);
        let response = self.executor.get(&url, Vec::new()).await?;
        let response = expect_ok(response, |status, body| SyncError::RecoveryFetchFailed {
            status,
            body,
        })?;
        decode(&response, Endpoint::RecoveryVow)
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn expect_ok(
    response: ApiResponse,
    on_error: impl FnOnce(u16, String) -> SyncError,
) -> Result<ApiResponse, SyncError> {
    if response.is_ok() {
        Ok(response)
    } else {
        warn!(status = %response.status, "Request failed");
        Err(on_error(response.status.as_u16(), response.body))
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse, endpoint: Endpoint) -> Result<T, SyncError> {
    response.json().map_err(|source| {
        warn!(error = %source, endpoint = %endpoint, "Failed to parse response");
        SyncError::Decode { endpoint, source }
    })
}

/// Returns true for payloads that carry no data: `null`, `false`, zero,
/// `{}`, `[]` and `""`.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeWhoop, api};
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_cycles_request_shape() {
        let fake = FakeWhoop::new();
        fake.route(
            "/cycles/aggregate/range/42",
            StatusCode::OK,
            r#"[{"id": 1, "day": "2023-01-01"}]"#,
        );
        let api = api(&fake).await;

        let cycles = api
            .get_cycles("2023-01-01T00:00:00.000Z", "2023-01-07T23:59:59.999Z", 26)
            .await
            .unwrap();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].id, Some(ResourceId::Number(1)));

        let request = fake.last_request("/cycles/aggregate/range/42").unwrap();
        assert_eq!(request.query_value("startTime"), Some("2023-01-01T00:00:00.000Z"));
        assert_eq!(request.query_value("endTime"), Some("2023-01-07T23:59:59.999Z"));
        assert_eq!(request.query_value("limit"), Some("26"));
        assert_eq!(request.query_value("apiVersion"), Some("7"));
    }

    #[tokio::test]
    async fn test_get_cycles_failure_embeds_status_and_body() {
        let fake = FakeWhoop::new();
        fake.route("/cycles/aggregate/range/42", StatusCode::BAD_GATEWAY, "upstream down");
        let api = api(&fake).await;

        let err = api.get_cycles("a", "b", 26).await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::CyclesFetchFailed { status: 502, ref body } if body == "upstream down"
        ));
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "Failed to get cycles: 502 - upstream down");
    }

    #[tokio::test]
    async fn test_get_cycles_decode_error() {
        let fake = FakeWhoop::new();
        fake.route("/cycles/aggregate/range/42", StatusCode::OK, r#"{"not": "a list"}"#);
        let api = api(&fake).await;

        let err = api.get_cycles("a", "b", 26).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Decode {
                endpoint: Endpoint::Cycles,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_sleep_event_passes_activity_id() {
        let fake = FakeWhoop::new();
        fake.route("/v1-passthrough", StatusCode::OK, r#"[{"type": "REM"}]"#);
        let api = api(&fake).await;

        let event = api.get_sleep_event(&ResourceId::from("s-1")).await.unwrap();

        assert_eq!(event, json!([{"type": "REM"}]));
        let request = fake.last_request("/v1-passthrough").unwrap();
        assert_eq!(request.query_value("activityId"), Some("s-1"));
    }

    #[tokio::test]
    async fn test_get_heart_rate_query() {
        let fake = FakeWhoop::new();
        fake.route(
            "/metrics/user/42",
            StatusCode::OK,
            r#"{"times": [1, 2], "values": [60, 61]}"#,
        );
        let api = api(&fake).await;

        let series = api.get_heart_rate("s", "e", 300).await.unwrap();
        assert_eq!(series.values, Some(vec![json!(60), json!(61)]));

        let request = fake.last_request("/metrics/user/42").unwrap();
        assert_eq!(request.query_value("name"), Some("heart_rate"));
        assert_eq!(request.query_value("order"), Some("t"));
        assert_eq!(request.query_value("step"), Some("300"));
        assert_eq!(request.query_value("start"), Some("s"));
        assert_eq!(request.query_value("end"), Some("e"));
    }

    #[tokio::test]
    async fn test_accessor_errors() {
        let fake = FakeWhoop::new();
        fake.route("/vows/sleep/1d/cycle/9", StatusCode::NOT_FOUND, "nope");
        fake.route("/v1-passthrough", StatusCode::INTERNAL_SERVER_ERROR, "err");
        fake.route("/metrics/user/42", StatusCode::BAD_REQUEST, "bad");
        fake.route("/vows/recovery/1d/cycle/9", StatusCode::NOT_FOUND, "none");
        let api = api(&fake).await;
        let id = ResourceId::from(9);

        assert!(matches!(
            api.get_sleep_vow(&id).await,
            Err(SyncError::SleepVowFetchFailed { status: 404, .. })
        ));
        assert!(matches!(
            api.get_sleep_event(&id).await,
            Err(SyncError::SleepEventFetchFailed { status: 500, .. })
        ));
        assert!(matches!(
            api.get_heart_rate("s", "e", 600).await,
            Err(SyncError::HeartRateFetchFailed { status: 400, .. })
        ));
        assert!(matches!(
            api.get_recovery_vow(&id).await,
            Err(SyncError::RecoveryFetchFailed { status: 404, .. })
        ));
    }

    #[test]
    fn test_is_empty_payload() {
        assert!(is_empty_payload(&json!(null)));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!("")));
        assert!(!is_empty_payload(&json!({"a": 1})));
        assert!(!is_empty_payload(&json!([0])));
        assert!(is_empty_payload(&json!(0)));
        assert!(is_empty_payload(&json!(0.0)));
        assert!(is_empty_payload(&json!(false)));
        assert!(!is_empty_payload(&json!(1)));
        assert!(!is_empty_payload(&json!(true)));
    }
}
