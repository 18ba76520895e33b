//! Error types for shelfdash
//!
//! Propagation policy: only [`AssembleError::SourceUnavailable`] crosses the
//! core boundary to the caller. Enrichment and store failures are absorbed
//! locally (sentinel substitution, logged no-ops) and never surface.

use thiserror::Error;
use uuid::Uuid;

/// Transport-level failure produced by a [`RemoteClient`](crate::client::RemoteClient).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request never produced a response (connect failure, timeout, DNS)
    #[error("request failed: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed into the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Whether a retry could plausibly succeed. Transport failures and
    /// rate-limit / server statuses qualify; client errors and parse
    /// failures are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Api { status, .. } => *status == 429 || *status >= 500,
            FetchError::Parse(_) => false,
        }
    }
}

/// Assembly failure: the primary search fetch itself failed.
///
/// Enrichment failures never produce this; they degrade to sentinels
/// per record instead.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Primary fetch failed; fatal to assembly, no partial collection is kept
    #[error("primary search fetch failed: {0}")]
    SourceUnavailable(#[from] FetchError),
}

/// Per-record enrichment failure, split by sub-fetch.
///
/// Recovered locally: the merge step maps each variant to the matching
/// sentinel ("Unknown" birth date, "N/A" top work).
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Author profile fetch or parse failed
    #[error("author profile fetch failed: {0}")]
    Profile(#[source] FetchError),

    /// Author works fetch or parse failed
    #[error("author works fetch failed: {0}")]
    Works(#[source] FetchError),
}

/// Collection store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Point update found no record with the given id.
    /// Callers absorb this: a stale edit against a since-replaced
    /// collection must not crash the view.
    #[error("no record matches update key {0}")]
    EditTargetMissing(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Network("timeout".into()).is_retryable());
        assert!(FetchError::Api { status: 429, message: "rate limited".into() }.is_retryable());
        assert!(FetchError::Api { status: 503, message: "unavailable".into() }.is_retryable());
        assert!(!FetchError::Api { status: 404, message: "not found".into() }.is_retryable());
        assert!(!FetchError::Parse("bad json".into()).is_retryable());
    }
}
