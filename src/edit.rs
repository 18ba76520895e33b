//! Modal edit session
//!
//! At most one record is under edit at a time. The session holds a draft
//! copy; the stored collection sees nothing until save hands the completed
//! draft back, keyed by the original record's id. Cancel discards the draft
//! without a trace.

use crate::models::{BookRecord, ColumnId};
use tracing::warn;

/// Edit session state machine: `Closed` or `Open` over exactly one record.
///
/// All field edits land on `draft`; `original` stays untouched for the
/// session's lifetime so cancel can discard cleanly.
#[derive(Debug, Clone, PartialEq)]
pub enum EditSession {
    Closed,
    Open {
        original: BookRecord,
        draft: BookRecord,
    },
}

impl EditSession {
    pub fn new() -> Self {
        EditSession::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open { .. })
    }

    /// Current draft, if a session is open
    pub fn draft(&self) -> Option<&BookRecord> {
        match self {
            EditSession::Open { draft, .. } => Some(draft),
            EditSession::Closed => None,
        }
    }

    /// Open a session over `record`. While a session is already open the
    /// call is refused; the active draft is never silently dropped.
    pub fn open(&mut self, record: BookRecord) -> bool {
        if let EditSession::Open { original, .. } = self {
            warn!(
                active = %original.id,
                requested = %record.id,
                "Edit session already open, ignoring open request"
            );
            return false;
        }
        *self = EditSession::Open {
            draft: record.clone(),
            original: record,
        };
        true
    }

    /// Apply one raw field edit to the draft.
    ///
    /// Numeric columns parse the input; unparseable or empty input clears
    /// the field to its absent state. Text columns take the input verbatim.
    /// No-op while closed.
    pub fn set_field(&mut self, column: ColumnId, raw: &str) {
        let EditSession::Open { draft, .. } = self else {
            warn!(column = %column, "Field edit with no open session, ignoring");
            return;
        };

        match column {
            ColumnId::Title => draft.title = raw.to_string(),
            ColumnId::AuthorName => draft.author_name = raw.to_string(),
            ColumnId::FirstPublishYear => {
                draft.first_publish_year = raw.trim().parse::<i64>().ok();
            }
            ColumnId::RatingsAverage => {
                draft.ratings_average = raw.trim().parse::<f64>().ok().filter(|r| r.is_finite());
            }
            ColumnId::Subject => draft.subject = raw.to_string(),
            ColumnId::AuthorBirthDate => draft.author_birth_date = raw.to_string(),
            ColumnId::AuthorTopWork => draft.author_top_work = raw.to_string(),
        }
    }

    /// Close the session and hand back the finished draft for storage.
    ///
    /// The draft leaves with the original's id regardless of what happened
    /// to it in between; identity never follows the edit. `None` if no
    /// session was open.
    pub fn save(&mut self) -> Option<BookRecord> {
        match std::mem::replace(self, EditSession::Closed) {
            EditSession::Open {
                original,
                mut draft,
            } => {
                draft.id = original.id;
                Some(draft)
            }
            EditSession::Closed => {
                warn!("Save with no open session, ignoring");
                None
            }
        }
    }

    /// Close the session, discarding the draft
    pub fn cancel(&mut self) {
        *self = EditSession::Closed;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

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
    fn test_open_edit_save_round_trip() {
        let original = record("Smith");
        let id = original.id;

        let mut session = EditSession::new();
        assert!(session.open(original));
        assert!(session.is_open());

        session.set_field(ColumnId::Title, "Smithson");
        session.set_field(ColumnId::AuthorName, "New Author");

        let saved = session.save().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.title, "Smithson");
        assert_eq!(saved.author_name, "New Author");
        // Untouched fields ride along unchanged
        assert_eq!(saved.subject, "Fiction");
        assert!(!session.is_open());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let original = record("Keep Me");
        let mut session = EditSession::new();
        session.open(original.clone());
        session.set_field(ColumnId::Title, "Discarded");

        session.cancel();
        assert!(!session.is_open());
        assert_eq!(session.save(), None);
    }

    #[test]
    fn test_draft_edits_do_not_touch_original() {
        let mut session = EditSession::new();
        session.open(record("Before"));
        session.set_field(ColumnId::Title, "After");

        match &session {
            EditSession::Open { original, draft } => {
                assert_eq!(original.title, "Before");
                assert_eq!(draft.title, "After");
            }
            EditSession::Closed => panic!("session should be open"),
        }
    }

    #[test]
    fn test_numeric_fields_parse_from_raw_input() {
        let mut session = EditSession::new();
        session.open(record("A"));

        session.set_field(ColumnId::FirstPublishYear, " 1984 ");
        session.set_field(ColumnId::RatingsAverage, "4.5");
        let draft = session.draft().unwrap();
        assert_eq!(draft.first_publish_year, Some(1984));
        assert_eq!(draft.ratings_average, Some(4.5));

        // Unparseable input clears to absent
        session.set_field(ColumnId::FirstPublishYear, "next year");
        session.set_field(ColumnId::RatingsAverage, "");
        let draft = session.draft().unwrap();
        assert_eq!(draft.first_publish_year, None);
        assert_eq!(draft.ratings_average, None);
    }

    #[test]
    fn test_open_while_open_is_refused() {
        let first = record("First");
        let first_id = first.id;

        let mut session = EditSession::new();
        assert!(session.open(first));
        assert!(!session.open(record("Second")));

        // The active session survives untouched
        let saved = session.save().unwrap();
        assert_eq!(saved.id, first_id);
        assert_eq!(saved.title, "First");
    }

    #[test]
    fn test_operations_on_closed_session_are_no_ops() {
        let mut session = EditSession::new();
        session.set_field(ColumnId::Title, "nobody home");
        assert_eq!(session.save(), None);
        session.cancel();
        assert!(!session.is_open());
    }

    #[test]
    fn test_save_restores_identity_on_draft() {
        let original = record("A");
        let id = original.id;

        let mut session = EditSession::new();
        session.open(original);
        // Mangle the draft id directly; save must put the keyed id back
        if let EditSession::Open { draft, .. } = &mut session {
            draft.id = Uuid::new_v4();
        }

        let saved = session.save().unwrap();
        assert_eq!(saved.id, id);
    }
}
