use jobtrack_model::{ApplicationField, FieldMapping, MappingTarget};
use serde::Serialize;

/// Review summary of a mapping, shown before the preview step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    /// Columns with a target field, in column order.
    pub mapped: Vec<(String, ApplicationField)>,
    /// Columns that will be ignored.
    pub ignored: Vec<String>,
    /// Required fields no column maps to.
    pub missing_required: Vec<ApplicationField>,
}

impl MappingSummary {
    pub fn from_mapping(mapping: &[FieldMapping]) -> Self {
        let mut mapped = Vec::new();
        let mut ignored = Vec::new();
        for entry in mapping {
            match entry.target {
                MappingTarget::Field(field) => mapped.push((entry.source_column.clone(), field)),
                MappingTarget::Ignore => ignored.push(entry.source_column.clone()),
            }
        }
        let missing_required = ApplicationField::REQUIRED
            .into_iter()
            .filter(|required| !mapped.iter().any(|(_, field)| field == required))
            .collect();
        Self {
            mapped,
            ignored,
            missing_required,
        }
    }

    /// True when every required field has a source column.
    ///
    /// An incomplete mapping still imports, but every row will be invalid.
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_required_fields() {
        let summary = MappingSummary::from_mapping(&[
            FieldMapping::new("Company", ApplicationField::CompanyName),
            FieldMapping::ignored("Mood"),
        ]);
        assert_eq!(summary.mapped.len(), 1);
        assert_eq!(summary.ignored, vec!["Mood"]);
        assert_eq!(
            summary.missing_required,
            vec![ApplicationField::Position, ApplicationField::Status]
        );
        assert!(!summary.is_complete());
    }
}
