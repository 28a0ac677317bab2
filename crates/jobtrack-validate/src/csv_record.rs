//! CSV rows: lenient mapping into a draft, then per-row validation.

use jobtrack_model::{ApplicationField, FieldMapping, RawObject, ValidationError};
use serde_json::Value;
use tracing::trace;

use crate::draft::ApplicationDraft;
use crate::options::{OptionalFieldPolicy, ValidationOptions};

/// Applies `mapping` to one data row.
///
/// Cells the mapping ignores are skipped; missing trailing cells read as
/// blank. Values that fail to parse are left unset and remembered in
/// [`ApplicationDraft::rejected`].
pub fn map_row_to_record(
    row: &[String],
    headers: &[String],
    mapping: &[FieldMapping],
) -> ApplicationDraft {
    let mut draft = ApplicationDraft::default();
    for (position, entry) in mapping.iter().enumerate() {
        let Some(field) = entry.target.field() else {
            continue;
        };
        let Some(column) = column_for(headers, position, &entry.source_column) else {
            continue;
        };
        let cell = row.get(column).map_or("", String::as_str);
        if !draft.set_from_text(field, cell) {
            trace!(
                column = %entry.source_column,
                field = %field,
                value = %cell,
                "cell did not parse"
            );
        }
    }
    draft
}

/// Checks a mapped row. `row_index` is the 1-based line number including
/// the header line.
pub fn validate(
    draft: &ApplicationDraft,
    row_index: usize,
    options: &ValidationOptions,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in ApplicationField::REQUIRED {
        let present = match field {
            ApplicationField::CompanyName => draft.company_name.is_some(),
            ApplicationField::Position => draft.position.is_some(),
            _ => draft.status.is_some(),
        };
        if present {
            continue;
        }
        let error =
            ValidationError::new(row_index, field.key(), format!("{} is required", field.key()));
        errors.push(match draft.rejected_value(field) {
            Some(raw) => error.with_raw_value(raw),
            None => error,
        });
    }

    if options.optional_fields == OptionalFieldPolicy::Strict {
        for rejected in draft.rejected.iter().filter(|r| !r.field.is_required()) {
            errors.push(
                ValidationError::new(
                    row_index,
                    rejected.field.key(),
                    format!("Invalid {}: {}", rejected.field.key(), rejected.raw),
                )
                .with_raw_value(rejected.raw.clone()),
            );
        }
    }

    if draft.salary_range_inverted() {
        errors.push(ValidationError::new(
            row_index,
            ApplicationField::SalaryMin.key(),
            "salaryMin must not exceed salaryMax",
        ));
    }
    errors
}

/// The row as a header-keyed object, for reporting rejected rows.
///
/// Cells beyond the header are dropped; for repeated headers the first
/// column wins.
pub fn row_object(row: &[String], headers: &[String]) -> RawObject {
    let mut object = RawObject::new();
    for (idx, header) in headers.iter().enumerate() {
        let cell = row.get(idx).cloned().unwrap_or_default();
        object
            .entry(header.clone())
            .or_insert_with(|| Value::String(cell));
    }
    object
}

/// Resolved mappings line up with the headers; anything else is found by
/// name.
fn column_for(headers: &[String], position: usize, source_column: &str) -> Option<usize> {
    if headers.get(position).is_some_and(|h| h == source_column) {
        return Some(position);
    }
    headers.iter().position(|h| h == source_column).or_else(|| {
        let wanted = source_column.trim();
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_model::ApplicationStatus;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    fn mapping() -> Vec<FieldMapping> {
        vec![
            FieldMapping::new("Company", ApplicationField::CompanyName),
            FieldMapping::new("Title", ApplicationField::Position),
            FieldMapping::new("Status", ApplicationField::Status),
            FieldMapping::new("Priority", ApplicationField::Priority),
            FieldMapping::ignored("Internal"),
        ]
    }

    fn headers() -> Vec<String> {
        strings(&["Company", "Title", "Status", "Priority", "Internal"])
    }

    #[test]
    fn maps_cells_through_the_mapping() {
        let row = strings(&["Acme", "Engineer", "interviewing", "high", "x"]);
        let draft = map_row_to_record(&row, &headers(), &mapping());
        assert_eq!(draft.company_name.as_deref(), Some("Acme"));
        assert_eq!(draft.status, Some(ApplicationStatus::Interviewing));
        assert!(validate(&draft, 2, &ValidationOptions::default()).is_empty());
    }

    #[test]
    fn short_rows_read_as_blank() {
        let row = strings(&["Acme"]);
        let draft = map_row_to_record(&row, &headers(), &mapping());
        let errors = validate(&draft, 3, &ValidationOptions::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["position", "status"]);
        assert!(errors.iter().all(|e| e.row_index == 3));
    }

    #[test]
    fn invalid_status_becomes_required_error_with_raw_value() {
        let row = strings(&["Acme", "Engineer", "bogus", "", ""]);
        let draft = map_row_to_record(&row, &headers(), &mapping());
        let errors = validate(&draft, 2, &ValidationOptions::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "status is required");
        assert_eq!(errors[0].raw_value.as_deref(), Some("bogus"));
    }

    #[test]
    fn invalid_optional_value_is_dropped_unless_strict() {
        let row = strings(&["Acme", "Engineer", "applied", "urgent", ""]);
        let draft = map_row_to_record(&row, &headers(), &mapping());
        assert_eq!(draft.priority, None);
        assert!(validate(&draft, 2, &ValidationOptions::default()).is_empty());

        let errors = validate(&draft, 2, &ValidationOptions::strict());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "priority");
        assert_eq!(errors[0].message, "Invalid priority: urgent");
    }

    #[test]
    fn inverted_salary_range_is_an_error() {
        let headers = strings(&["Company", "Title", "Status", "Min", "Max"]);
        let mapping = vec![
            FieldMapping::new("Company", ApplicationField::CompanyName),
            FieldMapping::new("Title", ApplicationField::Position),
            FieldMapping::new("Status", ApplicationField::Status),
            FieldMapping::new("Min", ApplicationField::SalaryMin),
            FieldMapping::new("Max", ApplicationField::SalaryMax),
        ];
        let row = strings(&["Acme", "Engineer", "applied", "150k", "$100,000"]);
        let draft = map_row_to_record(&row, &headers, &mapping);
        let errors = validate(&draft, 2, &ValidationOptions::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "salaryMin");
    }

    #[test]
    fn explicit_mapping_in_any_order_finds_columns_by_name() {
        let mapping = vec![
            FieldMapping::new("status", ApplicationField::Status),
            FieldMapping::new("Company", ApplicationField::CompanyName),
            FieldMapping::new("Title", ApplicationField::Position),
        ];
        let row = strings(&["Acme", "Engineer", "offer", "", ""]);
        let draft = map_row_to_record(&row, &headers(), &mapping);
        assert_eq!(draft.status, Some(ApplicationStatus::Offer));
        assert_eq!(draft.position.as_deref(), Some("Engineer"));
    }

    #[test]
    fn row_object_skips_extra_cells() {
        let headers = strings(&["A", "B"]);
        let row = strings(&["1", "2", "3"]);
        let object = row_object(&row, &headers);
        assert_eq!(object.len(), 2);
        assert_eq!(object["B"], "2");

        let short = row_object(&strings(&["1"]), &headers);
        assert_eq!(short["B"], "");
    }
}
