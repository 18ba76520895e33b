//! Dashboard controller
//!
//! Owns the collection, the view state, and the edit session behind one
//! lock, and exposes the callback hooks a render layer drives. All mutation
//! funnels through here; the render layer only ever sees snapshots.
//!
//! Locking rule: the state lock is never held across a remote fetch. A load
//! assembles the whole collection first and takes the write lock only for
//! the swap, so readers keep a coherent (previous) view throughout.

use crate::assembler::RecordAssembler;
use crate::client::{HttpRemoteClient, RemoteClient};
use crate::config::DashboardConfig;
use crate::debounce::Debouncer;
use crate::edit::EditSession;
use crate::error::AssembleError;
use crate::models::{BookRecord, Column, ColumnId, LoadPhase};
use crate::store::CollectionStore;
use crate::view::{self, ViewState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Everything the render layer needs to paint the table
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    /// Records on the current page, in display order
    pub page_records: Vec<BookRecord>,
    pub page_index: usize,
    pub total_pages: usize,
    /// Records matching the filter, across all pages
    pub total_records: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    /// Column catalog in display order
    pub columns: Vec<Column>,
    pub phase: LoadPhase,
    /// When the current collection finished loading
    pub loaded_at: Option<DateTime<Utc>>,
}

/// State behind the dashboard lock
struct DashboardState {
    store: CollectionStore,
    view: ViewState,
    edit: EditSession,
    phase: LoadPhase,
}

impl DashboardState {
    /// Pull the stored page index back inside the valid range for the
    /// current filtered count. Called after every mutating hook.
    fn clamp_page_index(&mut self) {
        let filtered = view::filtered_count(self.store.records(), &self.view.search);
        let total_pages = view::page_count(filtered, self.view.page_size);
        self.view.page_index = self.view.page_index.min(total_pages - 1);
    }
}

/// Top-level dashboard controller.
///
/// Cheap to clone; clones share state, so one instance can be handed to a
/// render layer while another drives loads.
#[derive(Clone)]
pub struct Dashboard {
    state: Arc<RwLock<DashboardState>>,
    assembler: Arc<RecordAssembler>,
    debouncer: Debouncer,
}

impl Dashboard {
    /// Build a dashboard over the given transport
    pub fn new(client: Arc<dyn RemoteClient>, config: &DashboardConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(DashboardState {
                store: CollectionStore::new(),
                view: ViewState::default(),
                edit: EditSession::new(),
                phase: LoadPhase::Loading,
            })),
            assembler: Arc::new(RecordAssembler::new(client, config)),
            debouncer: Debouncer::new(config.debounce_window),
        }
    }

    /// Build a dashboard with the production HTTP transport
    pub fn with_http_client(config: &DashboardConfig) -> Self {
        let client: Arc<dyn RemoteClient> = Arc::new(HttpRemoteClient::new(config));
        Self::new(client, config)
    }

    // ========================================================================
    // Load Lifecycle
    // ========================================================================

    /// Assemble the collection from the remote source and swap it in.
    ///
    /// View state resets to defaults and any open edit session closes when
    /// the swap happens. Search input still waiting out its debounce window
    /// is discarded before the load begins. On failure nothing partial is
    /// shown: the collection empties and the phase moves to Failed.
    ///
    /// # Errors
    /// [`AssembleError::SourceUnavailable`] when the primary fetch fails.
    /// This is the only error the dashboard surfaces.
    pub async fn load(&self) -> Result<(), AssembleError> {
        // A pending debounced search must not commit after the view reset
        self.debouncer.cancel_pending().await;
        self.state.write().await.phase = LoadPhase::Loading;

        // Assemble entirely outside the lock
        match self.assembler.assemble().await {
            Ok(records) => {
                let mut state = self.state.write().await;
                info!(record_count = records.len(), "Collection loaded");
                state.store.replace_all(records);
                state.view = ViewState::default();
                state.edit.cancel();
                state.phase = LoadPhase::Ready;
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write().await;
                error!(error = %e, "Collection load failed");
                state.store.clear();
                state.view = ViewState::default();
                state.edit.cancel();
                state.phase = LoadPhase::Failed;
                Err(e)
            }
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Derive the current page for rendering
    pub async fn table_view(&self) -> TableView {
        let state = self.state.read().await;
        let page = view::derive(state.store.records(), &state.view);
        TableView {
            page_records: page.records,
            page_index: page.page_index,
            total_pages: page.total_pages,
            total_records: page.total_records,
            can_go_prev: page.can_go_prev,
            can_go_next: page.can_go_next,
            columns: Column::catalog().to_vec(),
            phase: state.phase,
            loaded_at: state.store.loaded_at(),
        }
    }

    /// Draft under edit, for dialog rendering. `None` when no session is open.
    pub async fn edit_draft(&self) -> Option<BookRecord> {
        self.state.read().await.edit.draft().cloned()
    }

    // ========================================================================
    // View Hooks
    // ========================================================================

    /// Raw keystroke input. The query reaches the filter only after the
    /// debounce window passes with no newer input; superseded input is
    /// discarded, never queued.
    pub async fn on_search_input(&self, raw: &str) {
        let query = raw.to_string();
        let state = self.state.clone();
        self.debouncer
            .submit(async move {
                let mut state = state.write().await;
                debug!(query = %query, "Committing debounced search");
                state.view.search = query;
                state.clamp_page_index();
            })
            .await;
    }

    /// Advance the sort cycle for a column
    pub async fn on_sort_toggle(&self, column: ColumnId) {
        let mut state = self.state.write().await;
        state.view.toggle_sort(column);
        debug!(column = %column, sort = ?state.view.sort, "Sort toggled");
        state.clamp_page_index();
    }

    /// Move `delta` pages (negative = back). Overshooting either end lands
    /// on the boundary page.
    pub async fn on_page_change(&self, delta: i64) {
        let mut state = self.state.write().await;
        let filtered = view::filtered_count(state.store.records(), &state.view.search);
        let last = (view::page_count(filtered, state.view.page_size) - 1) as i64;
        let target = (state.view.page_index as i64 + delta).clamp(0, last);
        state.view.page_index = target as usize;
    }

    /// Switch to one of the allowed page sizes. Sizes outside the catalog
    /// are refused and leave the view untouched.
    pub async fn on_page_size_change(&self, size: usize) {
        let mut state = self.state.write().await;
        if !state.view.set_page_size(size) {
            warn!(size, "Rejected page size outside the allowed set");
            return;
        }
        state.clamp_page_index();
    }

    // ========================================================================
    // Edit Hooks
    // ========================================================================

    /// Open an edit session over the record with this id
    pub async fn on_edit_open(&self, id: Uuid) {
        let mut state = self.state.write().await;
        let Some(record) = state.store.get(id).cloned() else {
            warn!(record_id = %id, "Edit open for unknown record, ignoring");
            return;
        };
        state.edit.open(record);
    }

    /// Route one raw field edit into the open draft
    pub async fn on_edit_field(&self, column: ColumnId, raw: &str) {
        let mut state = self.state.write().await;
        state.edit.set_field(column, raw);
    }

    /// Write the draft back into the collection and close the session.
    /// A save whose target vanished (collection reloaded underneath) is
    /// absorbed with a warning.
    pub async fn on_edit_save(&self) {
        let mut state = self.state.write().await;
        let Some(draft) = state.edit.save() else {
            return;
        };
        let id = draft.id;
        match state.store.update(id, draft) {
            Ok(()) => info!(record_id = %id, "Edit saved"),
            Err(e) => warn!(record_id = %id, error = %e, "Edit save target missing, discarding"),
        }
        state.clamp_page_index();
    }

    /// Discard the draft and close the session
    pub async fn on_edit_cancel(&self) {
        let mut state = self.state.write().await;
        state.edit.cancel();
    }
}

// ============================================================================
// Tests
// ============================================================================
