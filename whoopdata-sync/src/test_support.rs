//! Route-based fake WHOOP API shared by this crate's tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use whoopdata_fetch::{
    ApiRequest, ApiResponse, Credentials, Endpoint, Endpoints, FetchError, HttpTransport,
};

use crate::api::WhoopApi;

/// Answers logins for user 42 and routes data requests by URL suffix.
///
/// A route holds a queue of responses; the last one repeats. Unrouted
/// requests get `404`.
pub(crate) struct FakeWhoop {
    routes: Mutex<Vec<(String, VecDeque<ApiResponse>)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeWhoop {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn route(&self, suffix: &str, status: StatusCode, body: &str) {
        self.route_sequence(suffix, vec![(status, body)]);
    }

    pub(crate) fn route_sequence(&self, suffix: &str, responses: Vec<(StatusCode, &str)>) {
        let queue = responses
            .into_iter()
            .map(|(status, body)| ApiResponse::new(status, body))
            .collect();
        self.routes
            .lock()
            .unwrap()
            .push((suffix.to_string(), queue));
    }

    /// Data requests whose URL contains `fragment`.
    pub(crate) fn requests_to(&self, fragment: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }

    pub(crate) fn last_request(&self, fragment: &str) -> Option<ApiRequest> {
        self.requests_to(fragment).pop()
    }
}

#[async_trait]
impl HttpTransport for FakeWhoop {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        if request.url.ends_with(Endpoint::Auth.path()) {
            return Ok(ApiResponse::new(
                StatusCode::OK,
                r#"{"access_token": "token", "user": {"id": 42}}"#,
            ));
        }

        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let Some((_, queue)) = routes.iter_mut().find(|(suffix, _)| url.ends_with(suffix.as_str()))
        else {
            return Ok(ApiResponse::new(StatusCode::NOT_FOUND, "no route"));
        };

        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        Ok(response.unwrap_or_else(|| ApiResponse::new(StatusCode::OK, "{}")))
    }
}

/// Logs in against the fake and returns a client.
pub(crate) async fn api(fake: &Arc<FakeWhoop>) -> WhoopApi {
    let credentials = Credentials::new("me@example.com", "pw").unwrap();
    WhoopApi::connect(fake.clone(), credentials, Endpoints::default())
        .await
        .unwrap()
}
