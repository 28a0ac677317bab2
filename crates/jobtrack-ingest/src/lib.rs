//! Tabular ingestion for application imports.
//!
//! This crate turns raw CSV text into rows of string cells. The parser is
//! deliberately permissive: it never fails on malformed quoting, it keeps
//! going and returns whatever rows it could read.
//!
//! # Example
//!
//! ```ignore
//! use jobtrack_ingest::{CsvDocument, parse};
//!
//! let rows = parse("Company,Role\n\"Acme, Inc.\",Engineer\n");
//! assert_eq!(rows[1][0], "Acme, Inc.");
//!
//! let document = CsvDocument::from_content("Company,Role\nAcme,Engineer\n")?;
//! assert_eq!(document.headers, vec!["Company", "Role"]);
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use csv::{CsvDocument, parse, strip_bom};
