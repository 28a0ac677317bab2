//! Error types for committing and session orchestration.
//!
//! Problems with the imported data itself are not errors here: they end up
//! in the preview buckets.

use std::path::PathBuf;

use jobtrack_ingest::IngestError;
use jobtrack_map::MappingError;
use thiserror::Error;

use crate::session::ImportStage;

/// Errors from a [`RecordStore`](crate::RecordStore) or a commit.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The preview failed as a whole and has nothing to commit.
    #[error("import preview is not valid and cannot be committed")]
    PreviewRejected,

    /// A record with this id is already stored, or appears twice in the batch.
    #[error("record id '{0}' already exists")]
    IdConflict(String),

    #[error("failed to access record store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record store {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from driving an [`ImportSession`](crate::ImportSession).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested step does not follow from the current stage.
    #[error("cannot {action} during the {stage} stage")]
    OutOfOrder {
        action: &'static str,
        stage: ImportStage,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type SessionResult<T> = std::result::Result<T, SessionError>;
