//! reqwest-backed request executor with timeout and retry support.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;
use url::Url;

use crate::error::TransportError;

use super::request::{ApiRequest, ApiResponse};
use super::RequestExecutor;

/// Production [`RequestExecutor`]: reqwest with a per-request timeout and
/// bounded retry of transient failures.
///
/// Retry policy lives here and nowhere else — server errors (5xx) and
/// connect/timeout failures are retried with exponential backoff up to the
/// configured attempt count; client errors are returned as-is on the first
/// response.
#[derive(Clone)]
pub struct HttpExecutor {
    client: ReqwestClient,
    base_url: String,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpExecutor {
    /// Start building an executor.
    pub fn builder() -> HttpExecutorBuilder {
        HttpExecutorBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns a transport error if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::builder().build(base_url)
    }

    fn build_request(&self, request: &ApiRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let base = request.base_url.as_deref().unwrap_or(&self.base_url);
        let full = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&full)
            .map_err(|e| TransportError::new(format!("invalid request URL {full}: {e}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        let mut builder = self.client.request(request.method.clone(), url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder)
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            // Rebuilt from the descriptor each attempt, so no clone issues
            // with consumed bodies.
            let builder = self.build_request(&request)?;

            debug!(attempt = attempt + 1, method = %request.method, path = %request.path, "sending HTTP request");

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let body = response.text().await.map_err(TransportError::from)?;
                    return Ok(ApiResponse { status: status.as_u16(), body });
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(err.into());
                }
            }
        }

        Err(TransportError::new(
            "http executor exhausted retries without producing a result",
        ))
    }
}

/// Builder for [`HttpExecutor`].
#[derive(Debug)]
pub struct HttpExecutorBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpExecutorBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpExecutorBuilder {
    /// Per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    #[must_use]
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Base delay for exponential backoff between retries.
    #[must_use]
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// User-agent header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the executor for the given API base URL.
    ///
    /// # Errors
    /// Returns a transport error if the underlying client cannot be built.
    pub fn build(self, base_url: impl Into<String>) -> Result<HttpExecutor, TransportError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(TransportError::from)?;

        Ok(HttpExecutor {
            client,
            base_url: base_url.into(),
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
