//! Error types for CSV ingestion.

use thiserror::Error;

/// Errors that reject a CSV payload as a whole.
///
/// Row-level problems never surface here; the parser is best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Content is empty or whitespace only.
    #[error("CSV file is empty")]
    EmptyContent,

    /// First row has no usable column names.
    #[error("CSV file has no header row")]
    NoHeader,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
