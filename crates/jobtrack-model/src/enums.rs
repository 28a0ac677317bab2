//! Closed enumerations carried by an application record.
//!
//! Every enum parses case-insensitively through [`FromStr`] and displays its
//! canonical wire value, which is also its serde representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Lowercases and folds `_`, whitespace and `-` runs into a single `-`.
fn fold_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Pipeline stage of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Target,
    Hunting,
    Applied,
    Interviewing,
    Offer,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 8] = [
        Self::Target,
        Self::Hunting,
        Self::Applied,
        Self::Interviewing,
        Self::Offer,
        Self::Accepted,
        Self::Rejected,
        Self::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Hunting => "hunting",
            Self::Applied => "applied",
            Self::Interviewing => "interviewing",
            Self::Offer => "offer",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns true once the application can no longer move forward.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Withdrawn)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_token(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == folded)
            .ok_or_else(|| ModelError::InvalidValue {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// User-assigned priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_token(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ModelError::InvalidValue {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkType {
    pub const ALL: [WorkType; 3] = [Self::Remote, Self::Hybrid, Self::Onsite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
            Self::Onsite => "onsite",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_token(s).as_str() {
            "remote" => Ok(Self::Remote),
            "hybrid" => Ok(Self::Hybrid),
            "onsite" | "on-site" => Ok(Self::Onsite),
            _ => Err(ModelError::InvalidValue {
                kind: "workType",
                value: s.to_string(),
            }),
        }
    }
}

/// Contract form of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Internship,
        Self::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
            Self::Internship => "internship",
            Self::Temporary => "temporary",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_token(s).as_str() {
            "full-time" | "fulltime" => Ok(Self::FullTime),
            "part-time" | "parttime" => Ok(Self::PartTime),
            "contract" | "contractor" => Ok(Self::Contract),
            "internship" | "intern" => Ok(Self::Internship),
            "temporary" | "temp" => Ok(Self::Temporary),
            _ => Err(ModelError::InvalidValue {
                kind: "employmentType",
                value: s.to_string(),
            }),
        }
    }
}

/// How accepted records are committed to the record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Add valid records next to the existing ones; duplicates are skipped.
    #[default]
    Merge,
    /// Clear the store first, then add valid records.
    Replace,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_token(s).as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            _ => Err(ModelError::InvalidValue {
                kind: "import mode",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "Interviewing".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Interviewing
        );
        assert_eq!(
            "  OFFER ".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Offer
        );
    }

    #[test]
    fn status_rejects_unknown_value() {
        let err = "bogus".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid status value 'bogus'");
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in ApplicationStatus::ALL {
            assert_eq!(
                status.to_string().parse::<ApplicationStatus>().unwrap(),
                status
            );
        }
    }

    #[test]
    fn employment_type_accepts_separator_variants() {
        for raw in ["full-time", "Full Time", "full_time", "FULLTIME"] {
            assert_eq!(
                raw.parse::<EmploymentType>().unwrap(),
                EmploymentType::FullTime
            );
        }
    }

    #[test]
    fn work_type_accepts_on_site_spellings() {
        for raw in ["onsite", "On-site", "on site"] {
            assert_eq!(raw.parse::<WorkType>().unwrap(), WorkType::Onsite);
        }
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&EmploymentType::PartTime).unwrap();
        assert_eq!(json, "\"part-time\"");
        let mode: ImportMode = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(mode, ImportMode::Replace);
    }

    #[test]
    fn closed_statuses() {
        assert!(ApplicationStatus::Rejected.is_closed());
        assert!(!ApplicationStatus::Applied.is_closed());
    }
}
