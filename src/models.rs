//! Core data model
//!
//! [`BookRecord`] is the assembled row every downstream stage consumes.
//! Absent source data is normalized at assembly into the sentinel values
//! here; downstream code never sees raw absence except through the
//! numeric `Option` fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sentinel for absent text the source should have had (author, birth date, title)
pub const UNKNOWN: &str = "Unknown";

/// Sentinel for data the source legitimately may not carry (subject, top work)
pub const NOT_AVAILABLE: &str = "N/A";

/// One assembled book row.
///
/// `id` is synthetic, assigned once at assembly, and is the only stable
/// identity a record has. Edits are keyed on it, so retitling a record
/// never detaches it from its row.
///
/// Numeric fields stay `None` when the source omitted them; display
/// layers render `None` as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Synthetic stable identity (never derived from record content)
    pub id: Uuid,
    pub title: String,
    /// Primary author display name ("Unknown" when the doc had none)
    pub author_name: String,
    pub first_publish_year: Option<i64>,
    pub ratings_average: Option<f64>,
    /// Primary subject heading ("N/A" when the doc had none)
    pub subject: String,
    /// From author profile enrichment ("Unknown" on absence or failure)
    pub author_birth_date: String,
    /// From author works enrichment ("N/A" on absence or failure)
    pub author_top_work: String,
}

impl BookRecord {
    /// Render label for the year column (`None` shows as "N/A")
    pub fn first_publish_year_label(&self) -> String {
        self.first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Render label for the rating column (`None` shows as "N/A")
    pub fn ratings_average_label(&self) -> String {
        self.ratings_average
            .map(|rating| rating.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Display text for one column of this record. Uniform accessor for
    /// table cells and edit dialog prefill.
    pub fn field_text(&self, column: ColumnId) -> String {
        match column {
            ColumnId::Title => self.title.clone(),
            ColumnId::AuthorName => self.author_name.clone(),
            ColumnId::FirstPublishYear => self.first_publish_year_label(),
            ColumnId::RatingsAverage => self.ratings_average_label(),
            ColumnId::Subject => self.subject.clone(),
            ColumnId::AuthorBirthDate => self.author_birth_date.clone(),
            ColumnId::AuthorTopWork => self.author_top_work.clone(),
        }
    }
}

// ============================================================================
// Column Catalog
// ============================================================================

/// Identity of a display column.
///
/// `ALL` fixes display order; every column participates in the sort cycle
/// and the edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    Title,
    AuthorName,
    FirstPublishYear,
    RatingsAverage,
    Subject,
    AuthorBirthDate,
    AuthorTopWork,
}

impl ColumnId {
    /// All columns in display order
    pub const ALL: [ColumnId; 7] = [
        ColumnId::Title,
        ColumnId::AuthorName,
        ColumnId::FirstPublishYear,
        ColumnId::RatingsAverage,
        ColumnId::Subject,
        ColumnId::AuthorBirthDate,
        ColumnId::AuthorTopWork,
    ];

    /// Stable field key (matches the source document field names)
    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnId::Title => "title",
            ColumnId::AuthorName => "author_name",
            ColumnId::FirstPublishYear => "first_publish_year",
            ColumnId::RatingsAverage => "ratings_average",
            ColumnId::Subject => "subject",
            ColumnId::AuthorBirthDate => "author_birth_date",
            ColumnId::AuthorTopWork => "author_top_work",
        }
    }

    /// Human-readable header label
    pub const fn label(self) -> &'static str {
        match self {
            ColumnId::Title => "Title",
            ColumnId::AuthorName => "Author",
            ColumnId::FirstPublishYear => "First Publish Year",
            ColumnId::RatingsAverage => "Average Rating",
            ColumnId::Subject => "Subject",
            ColumnId::AuthorBirthDate => "Author Birth Date",
            ColumnId::AuthorTopWork => "Author Top Work",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column descriptor handed to the render boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub label: &'static str,
    pub sortable: bool,
}

impl Column {
    /// Full catalog in display order. Every column sorts.
    pub fn catalog() -> [Column; 7] {
        ColumnId::ALL.map(|id| Column {
            id,
            label: id.label(),
            sortable: true,
        })
    }
}

// ============================================================================
// Load Phase
// ============================================================================

/// Lifecycle of the collection load.
///
/// Loading -> Ready on success, Loading -> Failed when the primary fetch
/// fails. A reload moves Ready/Failed back to Loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Assembly in flight; the previous collection is still visible
    Loading,
    /// Collection assembled and swapped in
    Ready,
    /// Primary fetch failed; collection is empty
    Failed,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadPhase::Loading => "loading",
            LoadPhase::Ready => "ready",
            LoadPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Tests
// ============================================================================
