//! Collection store
//!
//! Owns the assembled collection between loads. Order is assembly order and
//! nothing in the store ever reorders it; edits are in-place point updates
//! keyed by synthetic record id.

use crate::error::StoreError;
use crate::models::BookRecord;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// In-memory record collection.
///
/// Plain struct; the dashboard wraps it behind its own lock. Replacement
/// is wholesale (a new load swaps the entire collection), mutation is
/// per-record by id.
#[derive(Debug, Default)]
pub struct CollectionStore {
    records: Vec<BookRecord>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly assembled collection, stamping the load time
    pub fn replace_all(&mut self, records: Vec<BookRecord>) {
        debug!(count = records.len(), "Replacing collection");
        self.records = records;
        self.loaded_at = Some(Utc::now());
    }

    /// Drop the collection entirely (failed load). Clears the load stamp.
    pub fn clear(&mut self) {
        self.records.clear();
        self.loaded_at = None;
    }

    /// Overwrite the record with the given id in place.
    ///
    /// Position and identity are preserved: the stored record keeps its
    /// slot and the keyed id wins over whatever id the payload carries.
    pub fn update(&mut self, id: Uuid, mut record: BookRecord) -> Result<(), StoreError> {
        let slot = self
            .records
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(StoreError::EditTargetMissing(id))?;
        record.id = id;
        *slot = record;
        Ok(())
    }

    /// Look up one record by id
    pub fn get(&self, id: Uuid) -> Option<&BookRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// All records in assembly order
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the current collection finished loading, if one is loaded
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> BookRecord {
        BookRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author_name: "Author".to_string(),
            first_publish_year: Some(1970),
            ratings_average: Some(4.0),
            subject: "Fiction".to_string(),
            author_birth_date: "1940".to_string(),
            author_top_work: "Top".to_string(),
        }
    }

    #[test]
    fn test_replace_all_swaps_and_stamps() {
        let mut store = CollectionStore::new();
        assert!(store.loaded_at().is_none());

        store.replace_all(vec![record("A"), record("B")]);
        assert_eq!(store.len(), 2);
        assert!(store.loaded_at().is_some());

        store.replace_all(vec![record("C")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].title, "C");
    }

    #[test]
    fn test_clear_empties_collection() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record("A")]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.loaded_at().is_none());
    }

    #[test]
    fn test_update_preserves_position_and_identity() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record("A"), record("B"), record("C")]);
        let target = store.records()[1].id;

        let mut edited = record("B edited");
        edited.id = Uuid::new_v4(); // payload id is ignored in favor of the key
        store.update(target, edited).unwrap();

        let titles: Vec<&str> = store.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B edited", "C"]);
        assert_eq!(store.records()[1].id, target);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_title_does_not_detach_record() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record("Smith")]);
        let id = store.records()[0].id;

        let mut edited = store.records()[0].clone();
        edited.title = "Smithson".to_string();
        store.update(id, edited).unwrap();

        // Same identity, new title; a second edit still finds it
        assert_eq!(store.get(id).unwrap().title, "Smithson");
        let mut again = store.get(id).unwrap().clone();
        again.title = "Smithsonian".to_string();
        assert!(store.update(id, again).is_ok());
    }

    #[test]
    fn test_update_unknown_id_errors() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record("A")]);

        let missing = Uuid::new_v4();
        let result = store.update(missing, record("X"));
        assert!(matches!(result, Err(StoreError::EditTargetMissing(id)) if id == missing));
        // Collection untouched
        assert_eq!(store.records()[0].title, "A");
    }
}
