//! Persisting a reconciled preview.

mod file;
mod memory;

use std::collections::BTreeSet;

use jobtrack_model::{Application, ImportMode, ImportPreview};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{StoreError, StoreResult};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Where committed applications live.
///
/// Implementations may buffer changes; [`commit`] calls
/// [`flush`](RecordStore::flush) once all inserts are done.
pub trait RecordStore {
    /// Every stored record, in insertion order.
    fn records(&self) -> &[Application];

    fn insert(&mut self, record: Application) -> StoreResult<()>;

    /// Removes every record.
    fn clear(&mut self) -> StoreResult<()>;

    fn flush(&mut self) -> StoreResult<()> {
        Ok(())
    }

    fn contains_id(&self, id: &str) -> bool {
        self.records().iter().any(|record| record.id == id)
    }
}

/// What a commit changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub mode: ImportMode,
    pub inserted: usize,
    /// Records removed by a replace.
    pub removed: usize,
    pub skipped_duplicates: usize,
    pub skipped_invalid: usize,
}

/// Writes the valid records of `preview` into `store`.
///
/// Merge adds them next to the existing records; duplicates are never
/// written. Replace clears the store first. Ids are checked before anything
/// is changed, so a conflict leaves the store untouched.
///
/// # Errors
///
/// [`StoreError::PreviewRejected`] for a preview that failed as a whole,
/// [`StoreError::IdConflict`] when a record id is already taken, or the
/// store's own error.
pub fn commit<S>(
    store: &mut S,
    preview: &ImportPreview,
    mode: ImportMode,
) -> StoreResult<CommitSummary>
where
    S: RecordStore + ?Sized,
{
    if !preview.valid {
        return Err(StoreError::PreviewRejected);
    }

    let mut batch_ids = BTreeSet::new();
    for record in &preview.valid_records {
        if !batch_ids.insert(record.id.as_str())
            || (mode == ImportMode::Merge && store.contains_id(&record.id))
        {
            return Err(StoreError::IdConflict(record.id.clone()));
        }
    }

    let removed = match mode {
        ImportMode::Merge => 0,
        ImportMode::Replace => {
            let removed = store.records().len();
            store.clear()?;
            removed
        }
    };
    for record in &preview.valid_records {
        store.insert(record.clone())?;
    }
    store.flush()?;

    let summary = CommitSummary {
        mode,
        inserted: preview.valid_records.len(),
        removed,
        skipped_duplicates: preview.duplicates.len(),
        skipped_invalid: preview.invalid_records.len(),
    };
    info!(
        mode = %mode,
        inserted = summary.inserted,
        removed = summary.removed,
        skipped_duplicates = summary.skipped_duplicates,
        skipped_invalid = summary.skipped_invalid,
        "import committed"
    );
    Ok(summary)
}
