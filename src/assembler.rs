//! Record assembly
//!
//! Turns one primary search response plus per-record author enrichment into
//! the ordered collection the dashboard holds. Enrichment fans out across a
//! bounded worker pool; results are re-merged in primary-response order, so
//! assembly output order always equals source order regardless of which
//! enrichment finishes first.
//!
//! Failure model: the primary fetch is fatal ([`AssembleError`]), per-record
//! enrichment never is (sentinel degradation, per-record isolation).

use crate::client::RemoteClient;
use crate::config::DashboardConfig;
use crate::enrichment::{AuthorEnrichment, EnrichmentResolver};
use crate::error::{AssembleError, FetchError};
use crate::models::{BookRecord, NOT_AVAILABLE, UNKNOWN};
use crate::openlibrary::{search_url, SearchDoc, SearchResponse};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Assembles the full collection from the remote source.
///
/// Holds the transport and enrichment resolver; one assembler serves the
/// dashboard for its whole lifetime and is reused across reloads.
pub struct RecordAssembler {
    client: Arc<dyn RemoteClient>,
    resolver: EnrichmentResolver,
    search_url: String,
    concurrency: usize,
}

impl RecordAssembler {
    pub fn new(client: Arc<dyn RemoteClient>, config: &DashboardConfig) -> Self {
        let resolver = EnrichmentResolver::new(client.clone(), config.base_url.clone());
        Self {
            client,
            resolver,
            search_url: search_url(&config.base_url, &config.search_query),
            concurrency: config.enrichment_concurrency.max(1),
        }
    }

    /// Fetch the primary search response and enrich every document into a
    /// [`BookRecord`].
    ///
    /// Output order equals primary-response order. Enrichment runs across
    /// at most `enrichment_concurrency` records at a time.
    ///
    /// # Errors
    /// [`AssembleError::SourceUnavailable`] when the primary fetch or its
    /// decode fails. Enrichment failures never error; they degrade the
    /// affected record to sentinels.
    pub async fn assemble(&self) -> Result<Vec<BookRecord>, AssembleError> {
        let body = self.client.get_json(&self.search_url).await?;
        let response: SearchResponse = serde_json::from_value(body)
            .map_err(|e| AssembleError::SourceUnavailable(FetchError::Parse(e.to_string())))?;

        info!(
            docs = response.docs.len(),
            workers = self.concurrency,
            "Primary search fetched, enriching records"
        );

        let mut indexed: Vec<(usize, BookRecord)> =
            stream::iter(response.docs.into_iter().enumerate())
                .map(|(index, doc)| {
                    let resolver = self.resolver.clone();
                    async move {
                        let record = assemble_record(&resolver, doc).await;
                        (index, record)
                    }
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        // Completion order is arbitrary; restore source order before handing off
        indexed.sort_by_key(|(index, _)| *index);

        let records = indexed.into_iter().map(|(_, record)| record).collect();
        Ok(records)
    }
}

/// Enrich and normalize one search document.
///
/// A document without an author key skips both enrichment fetches outright.
async fn assemble_record(resolver: &EnrichmentResolver, doc: SearchDoc) -> BookRecord {
    let enrichment = match doc.primary_author_key() {
        Some(key) => resolver.resolve(key).await.merge(),
        None => {
            debug!(title = ?doc.title, "No author key, skipping enrichment");
            AuthorEnrichment::absent()
        }
    };
    normalize(doc, enrichment)
}

/// Collapse a raw document plus enrichment into a record, substituting
/// sentinels for absent source fields. The synthetic id is minted here and
/// never changes for the record's lifetime.
fn normalize(doc: SearchDoc, enrichment: AuthorEnrichment) -> BookRecord {
    BookRecord {
        id: Uuid::new_v4(),
        title: doc.title.unwrap_or_else(|| UNKNOWN.to_string()),
        author_name: doc
            .author_name
            .and_then(|names| names.into_iter().next())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        first_publish_year: doc.first_publish_year,
        ratings_average: doc.ratings_average,
        subject: doc
            .subject
            .and_then(|subjects| subjects.into_iter().next())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        author_birth_date: enrichment.birth_date,
        author_top_work: enrichment.top_work,
    }
}

// ============================================================================
// Tests
// ============================================================================
