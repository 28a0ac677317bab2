//! Turning raw import records into typed applications.
//!
//! There are two entry paths with intentionally different strictness:
//!
//! - **CSV**: [`map_row_to_record`] builds an [`ApplicationDraft`] from a
//!   row, silently dropping optional values it cannot parse, then
//!   [`validate`] reports required-field problems per row.
//! - **JSON**: [`validate_json_record`] reports every unparsable value as an
//!   error, since JSON files usually come from a previous export.
//!
//! [`ValidationOptions`] can make the CSV path as strict as the JSON one.

mod csv_record;
mod dates;
mod draft;
mod json_record;
mod options;
mod values;

pub use csv_record::{map_row_to_record, row_object, validate};
pub use dates::{parse_date, parse_timestamp};
pub use draft::{ApplicationDraft, RejectedValue};
pub use json_record::{JsonValidation, validate_json_record};
pub use options::{OptionalFieldPolicy, ValidationOptions};
pub use values::{parse_salary, split_tags};
