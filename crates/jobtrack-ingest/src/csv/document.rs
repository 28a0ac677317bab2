//! Header/data split over parsed CSV rows.

use jobtrack_model::RawRow;
use tracing::debug;

use crate::error::{IngestError, Result};

use super::parser::parse;

/// Removes a leading UTF-8 byte order mark.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// A CSV payload split into its header row and data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Column names from the first row, trimmed.
    pub headers: Vec<String>,
    /// Remaining rows, unpadded.
    pub rows: Vec<RawRow>,
}

impl CsvDocument {
    /// Parses `content` and treats the first row as the header.
    ///
    /// Fails only when there is nothing that could be imported: empty input
    /// or a header row with no non-empty column name.
    pub fn from_content(content: &str) -> Result<Self> {
        let content = strip_bom(content);
        if content.trim().is_empty() {
            return Err(IngestError::EmptyContent);
        }

        let mut rows = parse(content).into_iter();
        let headers = rows.next().ok_or(IngestError::EmptyContent)?;
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(IngestError::NoHeader);
        }
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let rows: Vec<RawRow> = rows.collect();

        let document = Self { headers, rows };
        debug!(
            columns = document.headers.len(),
            records = document.record_count(),
            "parsed CSV document"
        );
        let ragged = document.ragged_rows();
        if ragged > 0 {
            debug!(
                columns = document.headers.len(),
                ragged_rows = ragged,
                "rows with a different cell count than the header"
            );
        }
        Ok(document)
    }

    /// Number of data rows.
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Count of data rows whose cell count differs from the header.
    pub fn ragged_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.len() != self.headers.len())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_splits_header() {
        let doc =
            CsvDocument::from_content("Company,Role\nAcme,Engineer\nGlobex,Analyst\n").unwrap();
        assert_eq!(doc.headers, vec!["Company", "Role"]);
        assert_eq!(doc.record_count(), 2);
        assert_eq!(doc.rows[1][0], "Globex");
    }

    #[test]
    fn test_document_strips_bom() {
        let doc = CsvDocument::from_content("\u{feff}Company,Role\nAcme,Engineer").unwrap();
        assert_eq!(doc.headers[0], "Company");
    }

    #[test]
    fn test_document_empty_content() {
        assert_eq!(CsvDocument::from_content(""), Err(IngestError::EmptyContent));
        assert_eq!(CsvDocument::from_content(" \n \n"), Err(IngestError::EmptyContent));
    }

    #[test]
    fn test_document_blank_header() {
        assert_eq!(CsvDocument::from_content(",,\n1,2,3"), Err(IngestError::NoHeader));
    }

    #[test]
    fn test_document_header_only() {
        let doc = CsvDocument::from_content("Company,Role\n").unwrap();
        assert_eq!(doc.record_count(), 0);
    }

    #[test]
    fn test_document_short_rows_are_not_padded() {
        let doc = CsvDocument::from_content("a,b,c\n1\n").unwrap();
        assert_eq!(doc.rows[0], vec!["1"]);
        assert_eq!(doc.ragged_rows(), 1);
    }
}
