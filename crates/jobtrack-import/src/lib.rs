//! Import reconciliation for job applications.
//!
//! A reconciliation run takes raw file content and the records already in
//! the store, and partitions the input into three buckets:
//!
//! - `valid_records`: passed validation and match nothing existing
//! - `invalid_records`: failed validation, with the reasons
//! - `duplicates`: valid, but matching an existing record
//!
//! Runs are pure and synchronous. Persisting the result is a separate step
//! through a [`RecordStore`], usually driven by an [`ImportSession`].
//!
//! ```ignore
//! use jobtrack_import::{MemoryStore, ReconcileOptions, commit, reconcile_json};
//! use jobtrack_model::ImportMode;
//!
//! let mut store = MemoryStore::new();
//! let preview = reconcile_json(content, store.records(), &ReconcileOptions::default());
//! let summary = commit(&mut store, &preview, ImportMode::Merge)?;
//! ```

#![deny(unsafe_code)]

mod duplicate;
mod error;
mod options;
mod reconcile;
mod session;
mod source;
mod store;

pub use duplicate::{DuplicatePolicy, find_duplicate};
pub use error::{SessionError, StoreError};
pub use options::ReconcileOptions;
pub use reconcile::{ImportReport, reconcile, reconcile_csv, reconcile_json};
pub use session::{ImportSession, ImportStage};
pub use source::SourceKind;
pub use store::{CommitSummary, JsonFileStore, MemoryStore, RecordStore, commit};
