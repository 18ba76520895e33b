//! Author enrichment
//!
//! Resolves the two per-author sub-resources (profile, works list) that the
//! primary search response does not carry. The sub-fetches run concurrently
//! and fail independently; a failed or absent sub-resource degrades to its
//! sentinel at merge time and never aborts assembly.

use crate::client::RemoteClient;
use crate::error::{EnrichmentError, FetchError};
use crate::models::{NOT_AVAILABLE, UNKNOWN};
use crate::openlibrary::{author_url, author_works_url, AuthorProfile, AuthorWorks};
use std::sync::Arc;
use tracing::{debug, warn};

/// Raw outcome of the two enrichment sub-fetches, before sentinel
/// substitution. Kept separate from [`AuthorEnrichment`] so partial
/// failure stays visible to tests and logging.
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub profile: Result<AuthorProfile, EnrichmentError>,
    pub works: Result<AuthorWorks, EnrichmentError>,
}

impl EnrichmentOutcome {
    /// Collapse both sub-fetch results into display values.
    ///
    /// Failure, absence, and empty strings all land on the sentinel for
    /// that field; a profile failure never affects the top work and vice
    /// versa.
    pub fn merge(self) -> AuthorEnrichment {
        let birth_date = self
            .profile
            .ok()
            .and_then(|profile| profile.birth_date)
            .filter(|date| !date.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let top_work = self
            .works
            .ok()
            .and_then(|works| works.top_work().map(str::to_string))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        AuthorEnrichment {
            birth_date,
            top_work,
        }
    }
}

/// Sentinel-resolved author fields, ready to be written into a record
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorEnrichment {
    pub birth_date: String,
    pub top_work: String,
}

impl AuthorEnrichment {
    /// Enrichment for a record with no author key: both sub-fetches are
    /// skipped, both fields take their sentinels
    pub fn absent() -> Self {
        Self {
            birth_date: UNKNOWN.to_string(),
            top_work: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Fetches and decodes author sub-resources through a shared transport.
///
/// Cheap to clone; assembly clones one resolver into each per-record task.
#[derive(Clone)]
pub struct EnrichmentResolver {
    client: Arc<dyn RemoteClient>,
    base_url: String,
}

impl EnrichmentResolver {
    pub fn new(client: Arc<dyn RemoteClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch profile and works for one author key concurrently.
    ///
    /// Never fails as a whole: each sub-fetch carries its own result.
    pub async fn resolve(&self, author_key: &str) -> EnrichmentOutcome {
        debug!(author_key = %author_key, "Resolving author enrichment");

        let (profile, works) = tokio::join!(
            self.fetch_profile(author_key),
            self.fetch_works(author_key),
        );

        if let Err(e) = &profile {
            warn!(author_key = %author_key, error = %e, "Author profile enrichment failed");
        }
        if let Err(e) = &works {
            warn!(author_key = %author_key, error = %e, "Author works enrichment failed");
        }

        EnrichmentOutcome { profile, works }
    }

    async fn fetch_profile(&self, key: &str) -> Result<AuthorProfile, EnrichmentError> {
        let url = author_url(&self.base_url, key);
        let body = self
            .client
            .get_json(&url)
            .await
            .map_err(EnrichmentError::Profile)?;
        serde_json::from_value(body)
            .map_err(|e| EnrichmentError::Profile(FetchError::Parse(e.to_string())))
    }

    async fn fetch_works(&self, key: &str) -> Result<AuthorWorks, EnrichmentError> {
        let url = author_works_url(&self.base_url, key);
        let body = self
            .client
            .get_json(&url)
            .await
            .map_err(EnrichmentError::Works)?;
        serde_json::from_value(body)
            .map_err(|e| EnrichmentError::Works(FetchError::Parse(e.to_string())))
    }
}

// ============================================================================
// Tests
// ============================================================================
