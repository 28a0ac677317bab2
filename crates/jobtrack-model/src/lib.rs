//! Domain types for the job application import engine.
//!
//! Everything here is a plain value: the [`Application`] record, the closed
//! enumerations it carries, the column-to-field mapping types, and the
//! three-bucket [`ImportPreview`] produced by a reconciliation run.

pub mod application;
pub mod enums;
pub mod error;
pub mod field;
pub mod preview;

pub use application::Application;
pub use enums::{ApplicationStatus, EmploymentType, ImportMode, Priority, WorkType};
pub use error::{ModelError, Result};
pub use field::{ApplicationField, FieldMapping, MappingTarget};
pub use preview::{
    CsvImportResult, DuplicateRecord, ImportPreview, InvalidRecord, RawObject, RawRow,
    ValidationError,
};
