//! Mock implementations of the transport traits
//!
//! Provides mock objects for testing purposes.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::transport::request::{ApiRequest, ApiResponse};
use crate::transport::RequestExecutor;

/// Scripted request executor for tests.
///
/// Responses are keyed by request path; per-path sequences return a
/// different response on each call, and every executed request is captured
/// for later assertions.
///
/// # Examples
///
/// ```
/// use linkmesh_connector::testing::MockExecutor;
///
/// let executor = MockExecutor::new();
/// executor.add_response("people/~", 200, r#"{"id":"42"}"#);
/// assert!(!executor.was_called("people/~"));
/// ```
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: Mutex<HashMap<String, ApiResponse>>,
    response_sequences: Mutex<HashMap<String, Vec<ApiResponse>>>,
    failures: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockExecutor {
    /// Create an executor with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a path.
    pub fn add_response(&self, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .insert(path.to_string(), ApiResponse { status, body: body.to_string() });
    }

    /// Script a response sequence for a path (a different response on each
    /// call).
    pub fn add_response_sequence(&self, path: &str, responses: Vec<(u16, &str)>) {
        let sequence = responses
            .into_iter()
            .map(|(status, body)| ApiResponse { status, body: body.to_string() })
            .collect();
        self.response_sequences.lock().insert(path.to_string(), sequence);
    }

    /// Script a transport failure for a path.
    pub fn fail_with(&self, path: &str, message: &str) {
        self.failures.lock().insert(path.to_string(), message.to_string());
    }

    /// All requests that were executed, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Number of executed requests for a path.
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|req| req.path == path).count()
    }

    /// Whether a request was executed for the path.
    #[must_use]
    pub fn was_called(&self, path: &str) -> bool {
        self.request_count(path) > 0
    }

    /// The most recently executed request.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request.path.clone();
        self.requests.lock().push(request);

        if let Some(message) = self.failures.lock().get(&path) {
            return Err(TransportError::new(message.clone()));
        }

        let mut sequences = self.response_sequences.lock();
        if let Some(sequence) = sequences.get_mut(&path) {
            if !sequence.is_empty() {
                return Ok(sequence.remove(0));
            }
        }
        drop(sequences);

        self.responses
            .lock()
            .get(&path)
            .cloned()
            .ok_or_else(|| TransportError::new(format!("no response scripted for path: {path}")))
    }
}
