//! The persisted job application record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ApplicationStatus, EmploymentType, Priority, WorkType};
use crate::field::ApplicationField;

/// A fully typed job application.
///
/// Imported records become `Application`s once they pass validation; the
/// record store keeps the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company_name: String,
    pub position: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a record with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        company_name: impl Into<String>,
        position: impl Into<String>,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            company_name: company_name.into(),
            position: position.into(),
            status,
            priority: None,
            work_type: None,
            employment_type: None,
            location: None,
            salary_min: None,
            salary_max: None,
            salary_currency: None,
            applied_date: None,
            follow_up_date: None,
            deadline: None,
            job_url: None,
            source: None,
            contact_name: None,
            contact_email: None,
            notes: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Renders a field as flat text, the way it appears in a CSV cell.
    ///
    /// Unset optional fields render as an empty string; tags are joined
    /// with `;`.
    pub fn display_value(&self, field: ApplicationField) -> String {
        fn opt<T: ToString>(value: Option<&T>) -> String {
            value.map(ToString::to_string).unwrap_or_default()
        }
        fn date(value: Option<&NaiveDate>) -> String {
            value
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        }
        match field {
            ApplicationField::CompanyName => self.company_name.clone(),
            ApplicationField::Position => self.position.clone(),
            ApplicationField::Status => self.status.to_string(),
            ApplicationField::Priority => opt(self.priority.as_ref()),
            ApplicationField::WorkType => opt(self.work_type.as_ref()),
            ApplicationField::EmploymentType => opt(self.employment_type.as_ref()),
            ApplicationField::Location => opt(self.location.as_ref()),
            ApplicationField::SalaryMin => opt(self.salary_min.as_ref()),
            ApplicationField::SalaryMax => opt(self.salary_max.as_ref()),
            ApplicationField::SalaryCurrency => opt(self.salary_currency.as_ref()),
            ApplicationField::AppliedDate => date(self.applied_date.as_ref()),
            ApplicationField::FollowUpDate => date(self.follow_up_date.as_ref()),
            ApplicationField::Deadline => date(self.deadline.as_ref()),
            ApplicationField::JobUrl => opt(self.job_url.as_ref()),
            ApplicationField::Source => opt(self.source.as_ref()),
            ApplicationField::ContactName => opt(self.contact_name.as_ref()),
            ApplicationField::ContactEmail => opt(self.contact_email.as_ref()),
            ApplicationField::Notes => opt(self.notes.as_ref()),
            ApplicationField::Tags => self.tags.join(";"),
        }
    }
}
