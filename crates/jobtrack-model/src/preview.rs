//! Report types produced by an import run.
//!
//! These are request-scoped values: a reconciliation run builds one, the
//! caller inspects it and decides what to commit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::application::Application;
use crate::field::FieldMapping;

/// One parsed CSV line, one cell per column.
pub type RawRow = Vec<String>;

/// The untyped source of a record, kept for display of rejected input.
pub type RawObject = serde_json::Map<String, serde_json::Value>;

/// A single rule violation found in a CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// 1-based line number, counting the header line.
    pub row_index: usize,
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl ValidationError {
    pub fn new(row_index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row_index,
            field: field.into(),
            message: message.into(),
            raw_value: None,
        }
    }

    pub fn with_raw_value(mut self, raw: impl Into<String>) -> Self {
        self.raw_value = Some(raw.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row_index, self.message)
    }
}

/// A record that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRecord {
    /// 0-based position within the input batch.
    pub index: usize,
    pub data: RawObject,
    pub errors: Vec<String>,
}

/// A valid record that matches an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRecord {
    /// 0-based position within the input batch.
    pub index: usize,
    pub existing_id: String,
    pub data: Application,
}

/// Three-way partition of an import batch.
///
/// `valid_records`, `invalid_records` and `duplicates` are mutually exclusive
/// and together cover every input record. When the payload itself cannot be
/// read, `valid` is false, `errors` says why and every bucket is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    pub valid_records: Vec<Application>,
    pub invalid_records: Vec<InvalidRecord>,
    pub duplicates: Vec<DuplicateRecord>,
    pub total_records: usize,
}

impl ImportPreview {
    /// An accepted payload with no records yet.
    pub fn empty() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            valid_records: Vec::new(),
            invalid_records: Vec::new(),
            duplicates: Vec::new(),
            total_records: 0,
        }
    }

    /// A payload rejected as a whole.
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
            ..Self::empty()
        }
    }

    /// Returns true when the buckets add up to `total_records`.
    pub fn is_partitioned(&self) -> bool {
        self.valid_records.len() + self.invalid_records.len() + self.duplicates.len()
            == self.total_records
    }
}

/// Outcome of a CSV import: the preview plus the mapping that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvImportResult {
    pub headers: Vec<String>,
    pub mapping: Vec<FieldMapping>,
    pub row_errors: Vec<ValidationError>,
    #[serde(flatten)]
    pub preview: ImportPreview,
}

impl CsvImportResult {
    /// A CSV payload rejected before any row was read.
    pub fn failed(headers: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            headers,
            mapping: Vec::new(),
            row_errors: Vec::new(),
            preview: ImportPreview::failed(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_preview_has_empty_buckets() {
        let preview = ImportPreview::failed(vec!["Invalid JSON".to_string()]);
        assert!(!preview.valid);
        assert_eq!(preview.total_records, 0);
        assert!(preview.is_partitioned());
        assert_eq!(preview.errors, vec!["Invalid JSON"]);
    }

    #[test]
    fn validation_error_display_includes_row() {
        let error = ValidationError::new(3, "companyName", "companyName is required");
        assert_eq!(error.to_string(), "Row 3: companyName is required");
    }

    #[test]
    fn csv_result_flattens_preview() {
        let result = CsvImportResult::failed(vec!["A".to_string()], vec!["bad".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["totalRecords"], 0);
        assert_eq!(json["headers"][0], "A");
    }
}
