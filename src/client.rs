//! Remote source transport
//!
//! Thin JSON-over-HTTP seam between the dashboard core and the remote book
//! catalog. All remote reads go through the [`RemoteClient`] trait so tests
//! can script responses without a network.
//!
//! Retry policy: transient failures (transport errors, HTTP 429/5xx) are
//! retried up to the configured cap with linear backoff plus random jitter.
//! Client errors and parse failures fail immediately.

use crate::config::{DashboardConfig, RetryPolicy};
use crate::error::FetchError;
use async_trait::async_trait;
use rand::Rng;
use reqwest::{header, Client};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// User-Agent header sent with every request
const USER_AGENT: &str = "shelfdash/0.1.0";

/// Read-only JSON transport to a remote source.
///
/// Object-safe so assembly can hold an `Arc<dyn RemoteClient>` and tests can
/// substitute scripted implementations.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// GET the URL and deserialize the response body as JSON
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Production transport backed by reqwest.
///
/// Carries the request/connect timeouts and retry policy from
/// [`DashboardConfig`]; holds no other state, so one instance is shared
/// across all concurrent enrichment fetches.
pub struct HttpRemoteClient {
    /// HTTP client for API requests
    http_client: Client,
    /// Retry policy for transient failures
    retry: RetryPolicy,
}

impl HttpRemoteClient {
    /// Create a client with timeouts and retry policy from config
    pub fn new(config: &DashboardConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        Self {
            http_client: Client::builder()
                .timeout(config.request_timeout)
                .connect_timeout(config.connect_timeout)
                .default_headers(headers)
                .build()
                .expect("Failed to create HTTP client"),
            retry: config.retry.clone(),
        }
    }

    /// Single GET attempt, no retries
    async fn get_json_once(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("invalid JSON from {}: {}", url, e)))
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        get_with_retry(&self.retry, url, || self.get_json_once(url)).await
    }
}

/// Drive `attempt_fn` until it succeeds, fails terminally, or exhausts the
/// retry budget. Separated from the HTTP layer so the loop is testable with
/// scripted outcomes.
async fn get_with_retry<F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    mut attempt_fn: F,
) -> Result<serde_json::Value, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<serde_json::Value, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match attempt_fn().await {
            Ok(value) => {
                debug!(url = %url, attempt, "Fetch succeeded");
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = retry_delay(policy, attempt);
                warn!(
                    url = %url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient fetch failure, retrying"
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Backoff before retry `attempt` (1-based): linear base delay plus random
/// jitter. Jitter desynchronizes concurrent enrichment retries against the
/// same host.
fn retry_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let base = policy.base_delay * attempt;
    if policy.max_jitter.is_zero() {
        return base;
    }
    let jitter_ms = rand::thread_rng().gen_range(0..=policy.max_jitter.as_millis() as u64);
    base + Duration::from_millis(jitter_ms)
}

// ============================================================================
// Mock Transport (unit tests)
// ============================================================================


// ============================================================================
// Tests
// ============================================================================
