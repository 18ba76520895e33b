//! View derivation pipeline
//!
//! Pure projection from the stored collection to one visible page:
//! filter by author, stable sort, then paginate. The stored collection is
//! never mutated here; every hook change just re-derives.
//!
//! Derivation order is fixed (filter, then sort, then paginate) so page
//! boundaries always refer to the filtered and sorted sequence.

use crate::models::{BookRecord, ColumnId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Page sizes the view accepts, in menu order
pub const PAGE_SIZES: [usize; 6] = [10, 20, 30, 40, 50, 100];

/// Page size before the user picks one
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// View State
// ============================================================================

/// Sort direction for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort: one column, one direction. Absence of a SortSpec means
/// source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Everything that shapes the visible page.
///
/// `page_index` may go stale when the underlying collection shrinks; the
/// derive step clamps it, and hooks write the clamped value back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Committed (post-debounce) author filter text
    pub search: String,
    /// `None` = unsorted, collection in source order
    pub sort: Option<SortSpec>,
    /// Zero-based page position
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    /// Advance the sort cycle for a column:
    /// unsorted -> ascending -> descending -> unsorted.
    /// Toggling a different column starts that column's cycle fresh.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        self.sort = match self.sort {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Change the page size if it is one of [`PAGE_SIZES`]. Returns whether
    /// the size was accepted; a rejected size leaves the state untouched.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.page_size = size;
        true
    }
}

// ============================================================================
// Derived Page
// ============================================================================

/// One derived page plus the navigation facts a table header needs.
///
/// `page_index` is the effective (clamped) index, which may be lower than
/// the one in [`ViewState`] when the filtered set shrank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Records visible on this page, in display order
    pub records: Vec<BookRecord>,
    pub page_index: usize,
    pub total_pages: usize,
    /// Records matching the filter, across all pages
    pub total_records: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

/// Total pages for `total_records` records at `page_size` per page.
///
/// Minimum 1: an empty collection still presents one empty page.
pub fn page_count(total_records: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    ((total_records + size - 1) / size).max(1)
}

/// Filter predicate shared by [`derive`] and [`filtered_count`].
/// `needle_lower` must already be lower-cased; empty matches everything.
fn matches_search(record: &BookRecord, needle_lower: &str) -> bool {
    needle_lower.is_empty() || record.author_name.to_lowercase().contains(needle_lower)
}

/// How many records the filter keeps, without building the page
pub fn filtered_count(records: &[BookRecord], search: &str) -> usize {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .count()
}

/// Project the collection through the view state into one page.
///
/// Pure function of its inputs. Sorting is stable, so records that compare
/// equal keep their source order, and cycling a column back to unsorted
/// restores the exact pre-sort sequence.
pub fn derive(records: &[BookRecord], view: &ViewState) -> PageView {
    let needle = view.search.to_lowercase();
    let mut visible: Vec<&BookRecord> = records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .collect();

    if let Some(spec) = view.sort {
        visible.sort_by(|a, b| {
            let ordering = compare_by_column(a, b, spec.column);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let total_records = visible.len();
    let total_pages = page_count(total_records, view.page_size);
    let page_index = view.page_index.min(total_pages - 1);
    let start = page_index * view.page_size;

    let page_records = visible
        .into_iter()
        .skip(start)
        .take(view.page_size)
        .cloned()
        .collect();

    PageView {
        records: page_records,
        page_index,
        total_pages,
        total_records,
        can_go_prev: page_index > 0,
        can_go_next: page_index + 1 < total_pages,
    }
}

/// Ascending comparison for one column.
///
/// Strings compare case-insensitively. Absent numeric values order before
/// every present value, so "N/A" rows group at the top ascending.
fn compare_by_column(a: &BookRecord, b: &BookRecord, column: ColumnId) -> Ordering {
    match column {
        ColumnId::Title => compare_text(&a.title, &b.title),
        ColumnId::AuthorName => compare_text(&a.author_name, &b.author_name),
        ColumnId::FirstPublishYear => a.first_publish_year.cmp(&b.first_publish_year),
        ColumnId::RatingsAverage => compare_rating(a.ratings_average, b.ratings_average),
        ColumnId::Subject => compare_text(&a.subject, &b.subject),
        ColumnId::AuthorBirthDate => compare_text(&a.author_birth_date, &b.author_birth_date),
        ColumnId::AuthorTopWork => compare_text(&a.author_top_work, &b.author_top_work),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

// ============================================================================
// Tests
// ============================================================================
