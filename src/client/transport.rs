//! Resilient HTTP transport
//!
//! Issues a request and re-issues it on transient failure according to the
//! [`RetryPolicy`]. The transport is protocol-agnostic glue: it never
//! inspects or interprets request bodies.

use crate::client::backoff::RetryPolicy;
use crate::client::classify::ClientError;
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Client configuration
///
/// Explicit construction parameters instead of ambient globals, so tests
/// can inject small delays and a fake clock.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the review backend
    pub api_base: String,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
    /// Per-request timeout; None disables it
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".to_string(),
            retry: RetryPolicy::default(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// HTTP client with transparent retry
#[derive(Debug, Clone)]
pub struct ResilientClient {
    http: Client,
    policy: RetryPolicy,
}

impl ResilientClient {
    /// Create a new transport from a retry policy and optional timeout
    pub fn new(policy: RetryPolicy, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("codereview-client/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { http, policy })
    }

    /// Underlying HTTP client, for building requests
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Execute a request, retrying transient failures
    ///
    /// 2xx and 4xx responses return immediately. 5xx responses are retried
    /// while attempts remain; once exhausted, the final failing response is
    /// returned unmodified for the caller's classifier. Transport-level
    /// failures are retried the same way; once exhausted they become a
    /// terminal network error whose message never contains the raw
    /// transport text.
    pub async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let mut attempt: u32 = 0;

        loop {
            let req = request
                .try_clone()
                .ok_or_else(|| ClientError::internal("request body cannot be re-issued"))?;

            match self.http.execute(req).await {
                Ok(response) => {
                    let status = response.status();
                    if RetryPolicy::is_retryable_status(status) && self.policy.should_retry(attempt)
                    {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            "Request failed with {}, retrying after {:?} (attempt {}/{})",
                            status,
                            delay,
                            attempt + 1,
                            self.policy.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if self.policy.should_retry(attempt) {
                        let delay = self.policy.delay_for(attempt);
                        debug!(
                            "Transport failure ({}), retrying after {:?} (attempt {}/{})",
                            err,
                            delay,
                            attempt + 1,
                            self.policy.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    // Raw transport text stays in the logs
                    warn!("Request failed after {} attempts: {}", attempt + 1, err);
                    return Err(ClientError::network());
                }
            }
        }
    }
}
