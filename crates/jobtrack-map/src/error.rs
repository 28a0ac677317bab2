//! Error types for mapping operations.

use std::path::PathBuf;

use jobtrack_model::ApplicationField;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Mapping names a column the file does not have.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Same source column listed twice.
    #[error("Column '{0}' is mapped more than once")]
    DuplicateColumn(String),

    /// Two columns claim the same field.
    #[error("Field '{field}' is mapped from both '{first}' and '{second}'")]
    FieldMappedTwice {
        field: ApplicationField,
        first: String,
        second: String,
    },

    /// Saved mapping could not be read or written.
    #[error("failed to access mapping file {path}: {source}")]
    RepositoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Saved mapping is not valid JSON.
    #[error("invalid mapping file {path}: {source}")]
    RepositoryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
