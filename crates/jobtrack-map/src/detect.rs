//! Header auto-detection and mapping resolution.

use std::collections::{BTreeMap, BTreeSet};

use jobtrack_model::{ApplicationField, FieldMapping, MappingTarget};
use tracing::debug;

use crate::error::{MappingError, Result};
use crate::synonyms::{HeaderMatch, lookup_header};

/// Slots a generic salary column can fill, in column order.
const SALARY_SLOTS: [ApplicationField; 2] =
    [ApplicationField::SalaryMin, ApplicationField::SalaryMax];

/// Builds a mapping for every header, in header order.
///
/// Headers naming a field directly are assigned first; the first column wins
/// when two name the same field. Generic salary columns then fill the salary
/// slots by position: the first becomes `salaryMin`, the next `salaryMax`.
/// This is a positional heuristic. A third generic salary column, or a
/// "max" column placed before a "min" one under generic names, is not
/// inferred correctly and is left for the user to fix in review.
pub fn auto_detect(headers: &[String]) -> Vec<FieldMapping> {
    let matches: Vec<HeaderMatch> = headers.iter().map(|h| lookup_header(h)).collect();
    let mut targets = vec![MappingTarget::Ignore; headers.len()];
    let mut claimed: BTreeSet<ApplicationField> = BTreeSet::new();

    for (idx, header_match) in matches.iter().enumerate() {
        if let HeaderMatch::Field(field) = header_match {
            if claimed.insert(*field) {
                targets[idx] = MappingTarget::Field(*field);
            } else {
                debug!(
                    column = %headers[idx],
                    field = %field,
                    "field already claimed by an earlier column"
                );
            }
        }
    }

    for (idx, header_match) in matches.iter().enumerate() {
        if *header_match != HeaderMatch::Salary {
            continue;
        }
        match SALARY_SLOTS.into_iter().find(|slot| !claimed.contains(slot)) {
            Some(slot) => {
                claimed.insert(slot);
                targets[idx] = MappingTarget::Field(slot);
            }
            None => {
                debug!(column = %headers[idx], "no salary slot left for column");
            }
        }
    }

    headers
        .iter()
        .zip(targets)
        .map(|(header, target)| FieldMapping {
            source_column: header.clone(),
            target,
        })
        .collect()
}

/// Checks a caller-supplied mapping against the file's headers.
///
/// A mapping with one entry per header, in header order, is positional:
/// entry `i` addresses column `i`, so repeated header names are fine.
/// Otherwise every source column must exist and appear once. In both
/// cases no field may be the target of two columns.
pub fn validate_mapping(headers: &[String], mapping: &[FieldMapping]) -> Result<()> {
    if !is_positional(headers, mapping) {
        let mut seen_columns = BTreeSet::new();
        for entry in mapping {
            if find_header(headers, &entry.source_column).is_none() {
                return Err(MappingError::ColumnNotFound(entry.source_column.clone()));
            }
            if !seen_columns.insert(entry.source_column.trim().to_lowercase()) {
                return Err(MappingError::DuplicateColumn(entry.source_column.clone()));
            }
        }
    }

    let mut field_owner: BTreeMap<ApplicationField, &str> = BTreeMap::new();
    for entry in mapping {
        if let MappingTarget::Field(field) = entry.target {
            if let Some(first) = field_owner.get(&field) {
                return Err(MappingError::FieldMappedTwice {
                    field,
                    first: (*first).to_string(),
                    second: entry.source_column.clone(),
                });
            }
            field_owner.insert(field, entry.source_column.as_str());
        }
    }
    Ok(())
}

/// Resolves the mapping to use for `headers`.
///
/// With an explicit mapping, it is validated and expanded to one entry per
/// header; headers it does not mention are ignored. A positional mapping,
/// such as the one [`auto_detect`] returns, is taken column by column.
/// Without one, the mapping is auto-detected.
pub fn resolve_mapping(
    headers: &[String],
    explicit: Option<&[FieldMapping]>,
) -> Result<Vec<FieldMapping>> {
    let Some(explicit) = explicit else {
        return Ok(auto_detect(headers));
    };
    validate_mapping(headers, explicit)?;

    if is_positional(headers, explicit) {
        return Ok(headers
            .iter()
            .zip(explicit)
            .map(|(header, entry)| FieldMapping {
                source_column: header.clone(),
                target: entry.target,
            })
            .collect());
    }

    let resolved = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let target = explicit
                .iter()
                .find(|entry| find_header(headers, &entry.source_column) == Some(idx))
                .map_or(MappingTarget::Ignore, |entry| entry.target);
            FieldMapping {
                source_column: header.clone(),
                target,
            }
        })
        .collect();
    Ok(resolved)
}

/// One entry per header, each naming the header at its own position.
fn is_positional(headers: &[String], mapping: &[FieldMapping]) -> bool {
    mapping.len() == headers.len()
        && headers
            .iter()
            .zip(mapping)
            .all(|(header, entry)| same_header(header, &entry.source_column))
}

fn same_header(header: &str, column: &str) -> bool {
    header == column || header.trim().eq_ignore_ascii_case(column.trim())
}

/// Exact header match first, then trimmed case-insensitive.
fn find_header(headers: &[String], column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .or_else(|| headers.iter().position(|h| same_header(h, column)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn targets(mapping: &[FieldMapping]) -> Vec<Option<ApplicationField>> {
        mapping.iter().map(|m| m.target.field()).collect()
    }

    #[test]
    fn detects_known_headers_and_ignores_unknown() {
        let mapping = auto_detect(&headers(&["Company", "Job Title", "Status", "Mood"]));
        assert_eq!(
            targets(&mapping),
            vec![
                Some(ApplicationField::CompanyName),
                Some(ApplicationField::Position),
                Some(ApplicationField::Status),
                None,
            ]
        );
        assert_eq!(mapping[3].source_column, "Mood");
    }

    #[test]
    fn first_column_wins_for_repeated_field() {
        let mapping = auto_detect(&headers(&["Title", "Role"]));
        assert_eq!(
            targets(&mapping),
            vec![Some(ApplicationField::Position), None]
        );
    }

    #[test]
    fn two_generic_salary_columns_become_min_then_max() {
        let mapping = auto_detect(&headers(&["Company", "Salary", "Notes", "Compensation"]));
        assert_eq!(mapping[1].target.field(), Some(ApplicationField::SalaryMin));
        assert_eq!(mapping[3].target.field(), Some(ApplicationField::SalaryMax));
    }

    #[test]
    fn third_generic_salary_column_is_ignored() {
        let mapping = auto_detect(&headers(&["Salary", "Pay", "Compensation"]));
        assert_eq!(
            targets(&mapping),
            vec![
                Some(ApplicationField::SalaryMin),
                Some(ApplicationField::SalaryMax),
                None,
            ]
        );
    }

    #[test]
    fn explicit_salary_column_keeps_its_slot() {
        let mapping = auto_detect(&headers(&["Salary", "Min Salary"]));
        assert_eq!(mapping[0].target.field(), Some(ApplicationField::SalaryMax));
        assert_eq!(mapping[1].target.field(), Some(ApplicationField::SalaryMin));
    }

    #[test]
    fn validate_rejects_unknown_column() {
        let err = validate_mapping(
            &headers(&["Company"]),
            &[FieldMapping::new("Employer", ApplicationField::CompanyName)],
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::ColumnNotFound(c) if c == "Employer"));
    }

    #[test]
    fn validate_rejects_duplicate_column() {
        let err = validate_mapping(
            &headers(&["Company"]),
            &[
                FieldMapping::new("Company", ApplicationField::CompanyName),
                FieldMapping::ignored("company"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::DuplicateColumn(_)));
    }

    #[test]
    fn validate_rejects_field_mapped_twice() {
        let err = validate_mapping(
            &headers(&["A", "B"]),
            &[
                FieldMapping::new("A", ApplicationField::Position),
                FieldMapping::new("B", ApplicationField::Position),
            ],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Field 'position' is mapped from both 'A' and 'B'");
    }

    #[test]
    fn resolve_expands_explicit_mapping_to_all_headers() {
        let explicit = [FieldMapping::new("b", ApplicationField::CompanyName)];
        let mapping = resolve_mapping(&headers(&["A", "B", "Status"]), Some(&explicit)).unwrap();
        assert_eq!(
            targets(&mapping),
            vec![None, Some(ApplicationField::CompanyName), None]
        );
        assert_eq!(mapping[1].source_column, "B");
    }

    #[test]
    fn detected_mapping_resolves_with_repeated_headers() {
        let headers = headers(&["Company", "Salary", "Salary"]);
        let detected = auto_detect(&headers);
        validate_mapping(&headers, &detected).unwrap();
        let mapping = resolve_mapping(&headers, Some(&detected)).unwrap();
        assert_eq!(
            targets(&mapping),
            vec![
                Some(ApplicationField::CompanyName),
                Some(ApplicationField::SalaryMin),
                Some(ApplicationField::SalaryMax),
            ]
        );
    }

    #[test]
    fn positional_mapping_can_address_second_repeated_header() {
        let headers = headers(&["Notes", "Notes"]);
        let explicit = [
            FieldMapping::ignored("Notes"),
            FieldMapping::new("notes", ApplicationField::Notes),
        ];
        let mapping = resolve_mapping(&headers, Some(&explicit)).unwrap();
        assert_eq!(targets(&mapping), vec![None, Some(ApplicationField::Notes)]);
    }

    #[test]
    fn positional_mapping_still_rejects_field_mapped_twice() {
        let headers = headers(&["Salary", "Salary"]);
        let explicit = [
            FieldMapping::new("Salary", ApplicationField::SalaryMin),
            FieldMapping::new("Salary", ApplicationField::SalaryMin),
        ];
        let err = validate_mapping(&headers, &explicit).unwrap_err();
        assert!(matches!(err, MappingError::FieldMappedTwice { .. }));
    }

    #[test]
    fn resolve_without_explicit_mapping_auto_detects() {
        let mapping = resolve_mapping(&headers(&["Status"]), None).unwrap();
        assert_eq!(mapping[0].target.field(), Some(ApplicationField::Status));
    }
}
