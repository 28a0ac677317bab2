//! CSV reading utilities.

mod document;
mod parser;

pub use document::{CsvDocument, strip_bom};
pub use parser::parse;
