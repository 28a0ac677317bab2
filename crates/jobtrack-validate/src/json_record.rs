//! JSON records: every problem is reported.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use jobtrack_model::{Application, ApplicationField};
use serde_json::Value;

use crate::dates::parse_timestamp;
use crate::draft::ApplicationDraft;

/// Result of validating one JSON array element.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub record: Option<Application>,
}

impl JsonValidation {
    fn rejected(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
            record: None,
        }
    }
}

/// Validates one element of a JSON import array.
///
/// Keys are the camelCase field names. Unknown keys are ignored. `id`,
/// `createdAt` and `updatedAt` are kept when present so that re-importing
/// an export preserves identity.
pub fn validate_json_record(value: &Value, now: DateTime<Utc>) -> JsonValidation {
    let Some(object) = value.as_object() else {
        return JsonValidation::rejected(vec!["Record must be a JSON object".to_string()]);
    };

    let mut draft = ApplicationDraft::default();
    let mut errors = Vec::new();
    let mut reported = BTreeSet::new();

    for field in ApplicationField::ALL {
        let Some(raw) = object.get(field.key()) else {
            continue;
        };
        if let Some(message) = apply_value(&mut draft, field, raw) {
            errors.push(message);
            reported.insert(field);
        }
    }

    for field in ApplicationField::REQUIRED {
        let present = match field {
            ApplicationField::CompanyName => draft.company_name.is_some(),
            ApplicationField::Position => draft.position.is_some(),
            _ => draft.status.is_some(),
        };
        if !present && !reported.contains(&field) {
            errors.push(format!("{} is required", field.key()));
        }
    }

    if draft.salary_range_inverted() {
        errors.push("salaryMin must not exceed salaryMax".to_string());
    }

    match object.get("id") {
        None | Some(Value::Null) => {}
        Some(Value::String(id)) if !id.trim().is_empty() => draft.id = Some(id.trim().to_string()),
        Some(Value::String(_)) => {}
        Some(_) => errors.push("id must be a string".to_string()),
    }
    for (key, slot) in [
        ("createdAt", &mut draft.created_at),
        ("updatedAt", &mut draft.updated_at),
    ] {
        match object.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => match parse_timestamp(text) {
                Some(ts) => *slot = Some(ts),
                None => errors.push(format!("Invalid {key}: {text}")),
            },
            Some(_) => errors.push(format!("{key} must be a string")),
        }
    }

    if !errors.is_empty() {
        return JsonValidation::rejected(errors);
    }
    match draft.finalize(now) {
        Ok(record) => JsonValidation {
            valid: true,
            errors,
            record: Some(record),
        },
        Err(err) => JsonValidation::rejected(vec![err.to_string()]),
    }
}

/// Stores one JSON value; returns the error message if it is rejected.
fn apply_value(
    draft: &mut ApplicationDraft,
    field: ApplicationField,
    raw: &Value,
) -> Option<String> {
    let key = field.key();
    match raw {
        Value::Null => None,
        Value::String(text) => {
            (!draft.set_from_text(field, text)).then(|| format!("Invalid {key}: {}", text.trim()))
        }
        Value::Number(number)
            if matches!(field, ApplicationField::SalaryMin | ApplicationField::SalaryMax) =>
        {
            let accepted = number
                .as_f64()
                .is_some_and(|amount| draft.set_salary(field, amount));
            (!accepted).then(|| format!("Invalid {key}: {number}"))
        }
        Value::Array(items) if field == ApplicationField::Tags => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                let Some(tag) = item.as_str() else {
                    return Some("tags must be an array of strings".to_string());
                };
                let tag = tag.trim();
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
            }
            draft.tags.extend(tags);
            None
        }
        _ => Some(match field {
            ApplicationField::SalaryMin | ApplicationField::SalaryMax => {
                format!("{key} must be a number or string")
            }
            ApplicationField::Tags => {
                "tags must be an array of strings or a semicolon-separated string".to_string()
            }
            _ => format!("{key} must be a string"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use jobtrack_model::{ApplicationStatus, Priority};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn accepts_a_complete_record() {
        let result = validate_json_record(
            &json!({
                "companyName": "Acme",
                "position": "Engineer",
                "status": "applied",
                "priority": "high",
                "salaryMin": 100000,
                "salaryMax": "$120k",
                "appliedDate": "2024-05-02",
                "tags": ["rust", " remote ", ""],
                "unknownKey": 42
            }),
            now(),
        );
        assert!(result.valid, "{:?}", result.errors);
        let record = result.record.unwrap();
        assert_eq!(record.status, ApplicationStatus::Applied);
        assert_eq!(record.priority, Some(Priority::High));
        assert_eq!(record.salary_min, Some(100_000.0));
        assert_eq!(record.salary_max, Some(120_000.0));
        assert_eq!(record.applied_date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(record.tags, vec!["rust", "remote"]);
    }

    #[test]
    fn reports_missing_required_fields() {
        let result = validate_json_record(&json!({ "position": "Engineer" }), now());
        assert!(!result.valid);
        assert!(result.record.is_none());
        assert_eq!(result.errors, vec!["companyName is required", "status is required"]);
    }

    #[test]
    fn reports_invalid_status_once() {
        let result = validate_json_record(
            &json!({ "companyName": "Acme", "position": "Engineer", "status": "bogus" }),
            now(),
        );
        assert_eq!(result.errors, vec!["Invalid status: bogus"]);
    }

    #[test]
    fn reports_invalid_optional_values() {
        let result = validate_json_record(
            &json!({
                "companyName": "Acme",
                "position": "Engineer",
                "status": "applied",
                "priority": "urgent",
                "deadline": "someday",
                "location": 7,
                "tags": [1, 2]
            }),
            now(),
        );
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Invalid priority: urgent",
                "location must be a string",
                "Invalid deadline: someday",
                "tags must be an array of strings",
            ]
        );
    }

    #[test]
    fn non_string_required_field_is_a_type_error() {
        let result = validate_json_record(
            &json!({ "companyName": 12, "position": "Engineer", "status": "applied" }),
            now(),
        );
        assert_eq!(result.errors, vec!["companyName must be a string"]);
    }

    #[test]
    fn keeps_supplied_identity() {
        let result = validate_json_record(
            &json!({
                "id": "app-7",
                "companyName": "Acme",
                "position": "Engineer",
                "status": "offer",
                "createdAt": "2023-01-02T03:04:05Z"
            }),
            now(),
        );
        let record = result.record.unwrap();
        assert_eq!(record.id, "app-7");
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap()
        );
        assert_eq!(record.updated_at, now());
    }

    #[test]
    fn rejects_bad_timestamps_and_non_objects() {
        let result = validate_json_record(
            &json!({
                "companyName": "Acme",
                "position": "Engineer",
                "status": "offer",
                "updatedAt": "later"
            }),
            now(),
        );
        assert_eq!(result.errors, vec!["Invalid updatedAt: later"]);

        let scalar = validate_json_record(&json!("Acme"), now());
        assert_eq!(scalar.errors, vec!["Record must be a JSON object"]);
    }

    #[test]
    fn inverted_salary_range_is_an_error() {
        let result = validate_json_record(
            &json!({
                "companyName": "Acme",
                "position": "Engineer",
                "status": "applied",
                "salaryMin": 200000,
                "salaryMax": 100000
            }),
            now(),
        );
        assert_eq!(result.errors, vec!["salaryMin must not exceed salaryMax"]);
    }
}
