//! Dashboard configuration
//!
//! Plain structs built by the embedding application. There is no file or
//! environment loading layer; the dashboard core has no configuration surface
//! of its own.

use std::time::Duration;

/// Open Library API base URL
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Default primary search query
pub const DEFAULT_SEARCH_QUERY: &str = "books";

/// Enrichment worker pool width (concurrent per-record resolutions)
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 4;

/// Total per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection-establishment timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Quiet period before a raw search input reaches the view pipeline
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API base URL (override for tests / mirrors)
    pub base_url: String,
    /// Query string for the primary search fetch
    pub search_query: String,
    /// Maximum concurrent per-record enrichment resolutions
    pub enrichment_concurrency: usize,
    /// Total timeout applied to every outgoing request
    pub request_timeout: Duration,
    /// Connect timeout applied to every outgoing request
    pub connect_timeout: Duration,
    /// Retry behavior for failed requests
    pub retry: RetryPolicy,
    /// Quiet period for debounced search input
    pub debounce_window: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            enrichment_concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
            request_timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
            debounce_window: DEBOUNCE_WINDOW,
        }
    }
}

/// Bounded retry with jitter for transient request failures.
///
/// Attempt n (1-based) sleeps `base_delay * n` plus a random jitter in
/// `[0, max_jitter]` before retrying. Only transport errors and
/// retryable statuses (429, 5xx) are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt (0 disables retrying)
    pub max_retries: u32,
    /// Base backoff delay, scaled linearly per attempt
    pub base_delay: Duration,
    /// Upper bound on the random jitter added to each backoff
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_jitter: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Retry disabled entirely (single attempt per request)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.base_url, "https://openlibrary.org");
        assert_eq!(config.search_query, "books");
        assert_eq!(config.enrichment_concurrency, 4);
        assert_eq!(config.debounce_window, Duration::from_millis(300));
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn test_retry_none_disables_retrying() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.base_delay, Duration::ZERO);
    }
}
