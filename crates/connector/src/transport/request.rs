//! Outbound request and response descriptors.

use std::collections::HashMap;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConnectorError, ConnectorResult};

/// Description of one outbound API call.
///
/// Built fresh for every call and never reused; decoration mutates the two
/// entries it owns and leaves the rest of the descriptor alone.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,

    /// Path relative to the executor's base URL
    pub path: String,

    /// Overrides the executor's base URL when set (the token endpoint lives
    /// on the authorization host, not the API host)
    pub base_url: Option<String>,

    /// Query parameters, keyed — later inserts replace earlier ones
    pub query: HashMap<String, String>,

    /// Request headers, keyed the same way
    pub headers: HashMap<String, String>,

    /// URL-encoded form body
    pub form: Option<Vec<(String, String)>>,

    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request for the given method and relative path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            base_url: None,
            query: HashMap::new(),
            headers: HashMap::new(),
            form: None,
            body: None,
        }
    }

    /// GET request for a relative path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request for a relative path.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Send this request to a host other than the executor's default.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach a URL-encoded form body.
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response handed back by an executor.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the success range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    /// A body that fails to parse is a protocol violation, regardless of
    /// the HTTP status it arrived with.
    pub fn json<T: DeserializeOwned>(&self) -> ConnectorResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ConnectorError::Protocol(format!("response body is not valid JSON: {e}")))
    }
}
