//! Mapping external column headers onto application fields.
//!
//! Headers are normalized and looked up in a static synonym table
//! ([`lookup_header`]). [`auto_detect`] turns a header row into a complete
//! [`FieldMapping`](jobtrack_model::FieldMapping) set; [`resolve_mapping`]
//! prefers a caller-supplied mapping when there is one.

#![deny(unsafe_code)]

mod detect;
mod error;
mod repository;
mod summary;
mod synonyms;

pub use detect::{auto_detect, resolve_mapping, validate_mapping};
pub use error::{MappingError, Result};
pub use repository::{MappingRepository, StoredMapping, load_mapping_file};
pub use summary::MappingSummary;
pub use synonyms::{HeaderMatch, lookup_header, normalize_header};
