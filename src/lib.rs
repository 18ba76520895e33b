//! Book dashboard core
//!
//! Assembles a book collection from the Open Library search API, enriches
//! each record with per-author metadata, and serves the result through a
//! searchable, sortable, paginated view with local record editing. The
//! rendering surface is not here; a host UI drives the [`Dashboard`] hooks
//! and paints the [`TableView`] snapshots it gets back.

pub mod assembler;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod edit;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod openlibrary;
pub mod store;
pub mod view;

pub use crate::client::{HttpRemoteClient, RemoteClient};
pub use crate::config::{DashboardConfig, RetryPolicy};
pub use crate::dashboard::{Dashboard, TableView};
pub use crate::error::{AssembleError, EnrichmentError, FetchError, StoreError};
pub use crate::models::{BookRecord, Column, ColumnId, LoadPhase};
pub use crate::view::{PageView, SortDirection, SortSpec, ViewState, PAGE_SIZES};
