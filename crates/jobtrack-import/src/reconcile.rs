//! Three-bucket reconciliation of CSV and JSON payloads.

use jobtrack_ingest::{CsvDocument, strip_bom};
use jobtrack_map::{MappingSummary, resolve_mapping};
use jobtrack_model::{
    Application, CsvImportResult, DuplicateRecord, FieldMapping, ImportPreview, InvalidRecord,
    RawObject,
};
use jobtrack_validate::{map_row_to_record, row_object, validate, validate_json_record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::duplicate::{DuplicatePolicy, find_duplicate};
use crate::options::ReconcileOptions;
use crate::source::SourceKind;

/// Reconciliation result for either source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportReport {
    Csv(CsvImportResult),
    Json(ImportPreview),
}

impl ImportReport {
    pub fn preview(&self) -> &ImportPreview {
        match self {
            Self::Csv(result) => &result.preview,
            Self::Json(preview) => preview,
        }
    }

    pub fn into_preview(self) -> ImportPreview {
        match self {
            Self::Csv(result) => result.preview,
            Self::Json(preview) => preview,
        }
    }

    /// The mapping applied, for CSV reports.
    pub fn mapping(&self) -> Option<&[FieldMapping]> {
        match self {
            Self::Csv(result) => Some(&result.mapping),
            Self::Json(_) => None,
        }
    }
}

/// Reconciles `content` as `kind`. `mapping` only applies to CSV.
pub fn reconcile(
    kind: SourceKind,
    content: &str,
    existing: &[Application],
    mapping: Option<&[FieldMapping]>,
    options: &ReconcileOptions,
) -> ImportReport {
    match kind {
        SourceKind::Csv => ImportReport::Csv(reconcile_csv(content, existing, mapping, options)),
        SourceKind::Json => ImportReport::Json(reconcile_json(content, existing, options)),
    }
}

/// Reconciles a CSV payload.
///
/// The first row is the header. `mapping` overrides auto-detection; columns
/// it does not name are ignored. A file that has no header, or a mapping
/// that does not fit the header, rejects the whole payload.
pub fn reconcile_csv(
    content: &str,
    existing: &[Application],
    mapping: Option<&[FieldMapping]>,
    options: &ReconcileOptions,
) -> CsvImportResult {
    let span = info_span!("reconcile", format = "csv", existing = existing.len());
    let _guard = span.enter();

    let document = match CsvDocument::from_content(content) {
        Ok(document) => document,
        Err(err) => {
            warn!(error = %err, "CSV payload rejected");
            return CsvImportResult::failed(Vec::new(), vec![err.to_string()]);
        }
    };
    let resolved = match resolve_mapping(&document.headers, mapping) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(error = %err, "mapping does not fit the CSV header");
            return CsvImportResult::failed(document.headers, vec![err.to_string()]);
        }
    };
    let summary = MappingSummary::from_mapping(&resolved);
    if !summary.is_complete() {
        warn!(missing = ?summary.missing_required, "required fields are not mapped");
    }

    let mut builder = PreviewBuilder::new(existing, options.duplicates);
    let mut row_errors = Vec::new();
    for (index, row) in document.rows.iter().enumerate() {
        let row_index = index + 2;
        let draft = map_row_to_record(row, &document.headers, &resolved);
        let errors = validate(&draft, row_index, &options.validation);
        if !errors.is_empty() {
            debug!(row = row_index, errors = errors.len(), "row failed validation");
            let messages = errors.iter().map(|e| e.message.clone()).collect();
            builder.reject(index, row_object(row, &document.headers), messages);
            row_errors.extend(errors);
            continue;
        }
        match draft.finalize(options.now) {
            Ok(record) => builder.accept(index, record),
            Err(err) => {
                let data = row_object(row, &document.headers);
                builder.reject(index, data, vec![err.to_string()]);
            }
        }
    }

    let preview = builder.finish(document.rows.len());
    CsvImportResult {
        headers: document.headers,
        mapping: resolved,
        row_errors,
        preview,
    }
}

/// Reconciles a JSON payload, which must be an array of objects.
pub fn reconcile_json(
    content: &str,
    existing: &[Application],
    options: &ReconcileOptions,
) -> ImportPreview {
    let span = info_span!("reconcile", format = "json", existing = existing.len());
    let _guard = span.enter();

    let value: Value = match serde_json::from_str(strip_bom(content)) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "JSON payload rejected");
            return ImportPreview::failed(vec![format!("Invalid JSON: {err}")]);
        }
    };
    let Value::Array(items) = value else {
        warn!("JSON payload is not an array");
        return ImportPreview::failed(vec![
            "Expected a JSON array of application records".to_string(),
        ]);
    };

    let total = items.len();
    let mut builder = PreviewBuilder::new(existing, options.duplicates);
    for (index, item) in items.into_iter().enumerate() {
        let result = validate_json_record(&item, options.now);
        match result.record {
            Some(record) if result.valid => builder.accept(index, record),
            _ => {
                debug!(index, errors = result.errors.len(), "record failed validation");
                builder.reject(index, raw_object(item), result.errors);
            }
        }
    }
    builder.finish(total)
}

/// Collects records into the three buckets.
struct PreviewBuilder<'a> {
    existing: &'a [Application],
    policy: DuplicatePolicy,
    preview: ImportPreview,
}

impl<'a> PreviewBuilder<'a> {
    fn new(existing: &'a [Application], policy: DuplicatePolicy) -> Self {
        Self {
            existing,
            policy,
            preview: ImportPreview::empty(),
        }
    }

    fn accept(&mut self, index: usize, record: Application) {
        match find_duplicate(&record, self.existing, self.policy) {
            Some(original) => {
                debug!(
                    index,
                    existing_id = %original.id,
                    "record duplicates an existing application"
                );
                self.preview.duplicates.push(DuplicateRecord {
                    index,
                    existing_id: original.id.clone(),
                    data: record,
                });
            }
            None => self.preview.valid_records.push(record),
        }
    }

    fn reject(&mut self, index: usize, data: RawObject, errors: Vec<String>) {
        self.preview.invalid_records.push(InvalidRecord {
            index,
            data,
            errors,
        });
    }

    fn finish(mut self, total: usize) -> ImportPreview {
        self.preview.total_records = total;
        info!(
            total,
            valid = self.preview.valid_records.len(),
            invalid = self.preview.invalid_records.len(),
            duplicates = self.preview.duplicates.len(),
            "reconciliation finished"
        );
        self.preview
    }
}

/// Non-object elements are kept under a `value` key.
fn raw_object(item: Value) -> RawObject {
    match item {
        Value::Object(object) => object,
        other => {
            let mut object = RawObject::new();
            object.insert("value".to_string(), other);
            object
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jobtrack_model::{ApplicationField, ApplicationStatus};

    fn options() -> ReconcileOptions {
        ReconcileOptions::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    }

    fn existing() -> Vec<Application> {
        vec![Application::new(
            "existing-1",
            "Acme",
            "Engineer",
            ApplicationStatus::Applied,
            options().now,
        )]
    }

    #[test]
    fn csv_rows_fall_into_three_buckets() {
        let content = "Company,Role,Status\n\
                       Acme,engineer,applied\n\
                       Globex,Designer,offer\n\
                       ,Analyst,applied\n";
        let result = reconcile_csv(content, &existing(), None, &options());
        let preview = &result.preview;
        assert!(preview.valid);
        assert_eq!(preview.total_records, 3);
        assert_eq!(preview.valid_records.len(), 1);
        assert_eq!(preview.valid_records[0].company_name, "Globex");
        assert_eq!(preview.duplicates[0].existing_id, "existing-1");
        assert_eq!(preview.duplicates[0].index, 0);
        assert_eq!(preview.invalid_records[0].index, 2);
        assert_eq!(preview.invalid_records[0].errors, vec!["companyName is required"]);
        assert_eq!(result.row_errors[0].row_index, 4);
        assert!(preview.is_partitioned());
    }

    #[test]
    fn csv_reports_detected_mapping() {
        let result = reconcile_csv("Company,Notes\nAcme,hi\n", &[], None, &options());
        assert_eq!(result.headers, vec!["Company", "Notes"]);
        assert_eq!(
            result.mapping[0].target.field(),
            Some(ApplicationField::CompanyName)
        );
        assert_eq!(
            result.mapping[1].target.field(),
            Some(ApplicationField::Notes)
        );
    }

    #[test]
    fn empty_csv_is_rejected_whole() {
        let result = reconcile_csv("  \n", &[], None, &options());
        assert!(!result.preview.valid);
        assert_eq!(result.preview.errors, vec!["CSV file is empty"]);
        assert_eq!(result.preview.total_records, 0);
    }

    #[test]
    fn bad_explicit_mapping_is_rejected_whole() {
        let mapping = vec![FieldMapping::new("Employer", ApplicationField::CompanyName)];
        let result = reconcile_csv("Company\nAcme\n", &[], Some(&mapping), &options());
        assert!(!result.preview.valid);
        assert_eq!(result.preview.errors, vec!["Column not found: Employer"]);
        assert_eq!(result.headers, vec!["Company"]);
    }

    #[test]
    fn json_syntax_error_is_reported() {
        let preview = reconcile_json("[{", &[], &options());
        assert!(!preview.valid);
        assert!(preview.errors[0].starts_with("Invalid JSON: "));
        assert!(preview.valid_records.is_empty());
    }

    #[test]
    fn json_object_payload_is_rejected() {
        let preview = reconcile_json(r#"{"companyName":"Acme"}"#, &[], &options());
        assert_eq!(preview.errors, vec!["Expected a JSON array of application records"]);
    }

    #[test]
    fn json_scalars_in_array_are_invalid_records() {
        let preview = reconcile_json("[42]", &[], &options());
        assert!(preview.valid);
        assert_eq!(preview.invalid_records[0].data["value"], 42);
    }

    #[test]
    fn report_dispatches_on_kind() {
        let report = reconcile(SourceKind::Json, "[]", &[], None, &options());
        assert!(report.mapping().is_none());
        assert_eq!(report.preview().total_records, 0);
        assert!(report.into_preview().valid);
    }
}
