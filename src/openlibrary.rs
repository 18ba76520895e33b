//! Open Library endpoint shapes
//!
//! URL builders and response types for the three GET endpoints the dashboard
//! consumes. Response structs keep only the fields assembly reads; everything
//! else in the payloads is ignored.
//!
//! # API Reference
//! - Search: `https://openlibrary.org/search.json?q={query}`
//! - Author profile: `https://openlibrary.org/authors/{key}.json`
//! - Author works: `https://openlibrary.org/authors/{key}/works.json`

use serde::Deserialize;

/// Build the primary search URL
pub fn search_url(base: &str, query: &str) -> String {
    format!("{}/search.json?q={}", base, query)
}

/// Build the author profile URL for an author key (e.g. `OL23919A`)
pub fn author_url(base: &str, key: &str) -> String {
    format!("{}/authors/{}.json", base, key)
}

/// Build the author works URL for an author key
pub fn author_works_url(base: &str, key: &str) -> String {
    format!("{}/authors/{}/works.json", base, key)
}

// ============================================================================
// Response Types
// ============================================================================

/// Primary search response: ordered list of raw book documents
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// Raw search document. Every field is optional at the source; assembly
/// normalizes absences to sentinels. Not retained past assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub author_key: Option<Vec<String>>,
    pub first_publish_year: Option<i64>,
    pub ratings_average: Option<f64>,
    pub subject: Option<Vec<String>>,
}

impl SearchDoc {
    /// First author key, if the document carries any
    pub fn primary_author_key(&self) -> Option<&str> {
        self.author_key
            .as_ref()
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }
}

/// Author profile response
#[derive(Debug, Deserialize)]
pub struct AuthorProfile {
    pub birth_date: Option<String>,
}

/// Author works response: ordered list of work entries
#[derive(Debug, Deserialize)]
pub struct AuthorWorks {
    #[serde(default)]
    pub entries: Vec<WorkEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WorkEntry {
    pub title: Option<String>,
}

impl AuthorWorks {
    /// The "top work": first work in returned order whose title is a
    /// non-empty string. `None` if no entry qualifies.
    pub fn top_work(&self) -> Option<&str> {
        self.entries
            .iter()
            .filter_map(|work| work.title.as_deref())
            .find(|title| !title.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
