//! Scripted transport shared by this crate's tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::endpoints::Endpoint;
use crate::error::FetchError;
use crate::host::http::{ApiRequest, ApiResponse, HttpTransport};

/// Answers auth-endpoint requests as logins and everything else from a queue.
///
/// Logins succeed with `token-N` for user 42 unless an auth response was
/// queued. Data requests fall back to `200 {}` once the queue is empty.
pub(crate) struct ScriptedTransport {
    auth: Mutex<VecDeque<ApiResponse>>,
    data: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
    logins: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            auth: Mutex::new(VecDeque::new()),
            data: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            logins: AtomicUsize::new(0),
        }
    }

    pub(crate) fn push_auth(&self, status: StatusCode, body: &str) {
        self.auth
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub(crate) fn push(&self, status: StatusCode, body: &str) {
        self.data
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub(crate) fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn data_requests(&self) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| !is_login(r))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let is_login = is_login(&request);
        self.requests.lock().unwrap().push(request);

        if is_login {
            let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
            let scripted = self.auth.lock().unwrap().pop_front();
            return Ok(scripted.unwrap_or_else(|| {
                ApiResponse::new(
                    StatusCode::OK,
                    format!(r#"{{"access_token": "token-{n}", "user": {{"id": 42}}}}"#),
                )
            }));
        }

        let scripted = self.data.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| ApiResponse::new(StatusCode::OK, "{}")))
    }
}

fn is_login(request: &ApiRequest) -> bool {
    request.url.ends_with(Endpoint::Auth.path())
}
