//! Mappable application fields and column mapping types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A domain field that an external column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationField {
    CompanyName,
    Position,
    Status,
    Priority,
    WorkType,
    EmploymentType,
    Location,
    SalaryMin,
    SalaryMax,
    SalaryCurrency,
    AppliedDate,
    FollowUpDate,
    Deadline,
    JobUrl,
    Source,
    ContactName,
    ContactEmail,
    Notes,
    Tags,
}

impl ApplicationField {
    /// All fields in export column order.
    pub const ALL: [ApplicationField; 19] = [
        Self::CompanyName,
        Self::Position,
        Self::Status,
        Self::Priority,
        Self::WorkType,
        Self::EmploymentType,
        Self::Location,
        Self::SalaryMin,
        Self::SalaryMax,
        Self::SalaryCurrency,
        Self::AppliedDate,
        Self::FollowUpDate,
        Self::Deadline,
        Self::JobUrl,
        Self::Source,
        Self::ContactName,
        Self::ContactEmail,
        Self::Notes,
        Self::Tags,
    ];

    /// Fields every imported record must carry.
    pub const REQUIRED: [ApplicationField; 3] = [Self::CompanyName, Self::Position, Self::Status];

    /// Canonical camelCase key used in JSON records and error messages.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::Position => "position",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::WorkType => "workType",
            Self::EmploymentType => "employmentType",
            Self::Location => "location",
            Self::SalaryMin => "salaryMin",
            Self::SalaryMax => "salaryMax",
            Self::SalaryCurrency => "salaryCurrency",
            Self::AppliedDate => "appliedDate",
            Self::FollowUpDate => "followUpDate",
            Self::Deadline => "deadline",
            Self::JobUrl => "jobUrl",
            Self::Source => "source",
            Self::ContactName => "contactName",
            Self::ContactEmail => "contactEmail",
            Self::Notes => "notes",
            Self::Tags => "tags",
        }
    }

    /// Human-readable column header.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::Position => "Position",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::WorkType => "Work Type",
            Self::EmploymentType => "Employment Type",
            Self::Location => "Location",
            Self::SalaryMin => "Salary Min",
            Self::SalaryMax => "Salary Max",
            Self::SalaryCurrency => "Salary Currency",
            Self::AppliedDate => "Applied Date",
            Self::FollowUpDate => "Follow Up Date",
            Self::Deadline => "Deadline",
            Self::JobUrl => "Job URL",
            Self::Source => "Source",
            Self::ContactName => "Contact Name",
            Self::ContactEmail => "Contact Email",
            Self::Notes => "Notes",
            Self::Tags => "Tags",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for ApplicationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ApplicationField {
    type Err = ModelError;

    /// Parses a canonical key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::InvalidValue {
                kind: "field",
                value: s.to_string(),
            })
    }
}

/// Where a source column goes.
///
/// `Ignore` is the explicit "unmapped" variant; on the wire it is `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "Option<ApplicationField>",
    into = "Option<ApplicationField>"
)]
pub enum MappingTarget {
    Field(ApplicationField),
    #[default]
    Ignore,
}

impl MappingTarget {
    pub fn field(&self) -> Option<ApplicationField> {
        match self {
            Self::Field(field) => Some(*field),
            Self::Ignore => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignore)
    }
}

impl From<Option<ApplicationField>> for MappingTarget {
    fn from(value: Option<ApplicationField>) -> Self {
        value.map_or(Self::Ignore, Self::Field)
    }
}

impl From<MappingTarget> for Option<ApplicationField> {
    fn from(value: MappingTarget) -> Self {
        value.field()
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.key()),
            Self::Ignore => f.write_str("(ignored)"),
        }
    }
}

/// Pairing of one external column with its target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source_column: String,
    #[serde(rename = "targetField", default)]
    pub target: MappingTarget,
}

impl FieldMapping {
    pub fn new(source_column: impl Into<String>, field: ApplicationField) -> Self {
        Self {
            source_column: source_column.into(),
            target: MappingTarget::Field(field),
        }
    }

    pub fn ignored(source_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target: MappingTarget::Ignore,
        }
    }
}
