//! Searchability workspace for the Disease Support Finder.
//!
//! Users flip the `is_searchable` flag of diseases locally, singly or by NANDO
//! group, and persist the accumulated edits in one batch request. The
//! workspace keeps the edits as an ordered diff queue so that saving,
//! reloading and failed requests never lose or reorder them.
//!
//! # Features
//!
//! - **Diff queue**: at most one pending change per disease, last writer wins
//! - **Load generations**: responses to superseded loads are dropped
//! - **Busy gating**: edits and new requests are refused while a save runs
//! - **Reload overlay**: pending values are re-applied after every reload
//! - **Table view**: filtering and pagination that never touch the data
//!
//! # Example
//!
//! ```
//! use dsf_model::DiseaseRecord;
//! use dsf_workspace::Workspace;
//!
//! let mut workspace = Workspace::new();
//! let ticket = workspace.begin_load().unwrap();
//! workspace
//!     .finish_load(ticket, Ok(vec![DiseaseRecord::new("d1", "Fabry").with_nando_id("NANDO:1200002")]))
//!     .unwrap();
//!
//! workspace.group_toggle("1", true).unwrap();
//! assert_eq!(workspace.pending_count(), 1);
//! ```
//!
//! # Architecture
//!
//! - `queue.rs` - Ordered pending change set
//! - `view.rs` - Filter and pagination
//! - `workspace.rs` - Phase machine, notices and the begin/finish halves of requests
//! - `backend.rs` - Backend traits implemented by `ApiClient`
//! - `controller.rs` - Async driver tying a backend to a workspace
//! - `detail.rs` - Disease detail and search page loaders
//! - `error.rs` - Error types with user-friendly messages

mod backend;
mod controller;
mod detail;
mod error;
mod queue;
mod view;
mod workspace;

pub use backend::{DiseaseSource, SearchableBackend};
pub use controller::{SaveOutcome, WorkspaceController, export_file_name};
pub use detail::{
    DiseaseDetail, PartialFailure, SearchOverview, load_disease_detail, load_search_overview,
};
pub use error::{Result, WorkspaceError};
pub use queue::ChangeQueue;
pub use view::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS, TablePage, TableView};
pub use workspace::{
    LoadOutcome, LoadSummary, LoadTicket, Notice, NoticeKind, Phase, SaveTicket, Workspace,
};
