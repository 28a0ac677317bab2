//! A partially populated application, before required fields are checked.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use jobtrack_model::{
    Application, ApplicationField, ApplicationStatus, EmploymentType, ModelError, Priority,
    WorkType,
};
use uuid::Uuid;

use crate::dates::parse_date;
use crate::values::{parse_salary, split_tags};

/// A source value that was present but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedValue {
    pub field: ApplicationField,
    pub raw: String,
}

/// Every field optional; produced by both import paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub id: Option<String>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub priority: Option<Priority>,
    pub work_type: Option<WorkType>,
    pub employment_type: Option<EmploymentType>,
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub applied_date: Option<NaiveDate>,
    pub follow_up_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub job_url: Option<String>,
    pub source: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Values dropped because they did not parse, in source order.
    pub rejected: Vec<RejectedValue>,
}

impl ApplicationDraft {
    /// Parses `raw` into `field`.
    ///
    /// Blank input leaves the field unset and counts as accepted. Returns
    /// `false` and records a [`RejectedValue`] when the text does not parse.
    pub fn set_from_text(&mut self, field: ApplicationField, raw: &str) -> bool {
        use ApplicationField as F;

        let value = raw.trim();
        if value.is_empty() {
            return true;
        }
        let accepted = match field {
            F::CompanyName => set_text(&mut self.company_name, value),
            F::Position => set_text(&mut self.position, value),
            F::Location => set_text(&mut self.location, value),
            F::SalaryCurrency => set_text(&mut self.salary_currency, value),
            F::JobUrl => set_text(&mut self.job_url, value),
            F::Source => set_text(&mut self.source, value),
            F::ContactName => set_text(&mut self.contact_name, value),
            F::ContactEmail => set_text(&mut self.contact_email, value),
            F::Notes => set_text(&mut self.notes, value),
            F::Status => set_parsed(&mut self.status, value),
            F::Priority => set_parsed(&mut self.priority, value),
            F::WorkType => set_parsed(&mut self.work_type, value),
            F::EmploymentType => set_parsed(&mut self.employment_type, value),
            F::SalaryMin => set_some(&mut self.salary_min, parse_salary(value)),
            F::SalaryMax => set_some(&mut self.salary_max, parse_salary(value)),
            F::AppliedDate => set_some(&mut self.applied_date, parse_date(value)),
            F::FollowUpDate => set_some(&mut self.follow_up_date, parse_date(value)),
            F::Deadline => set_some(&mut self.deadline, parse_date(value)),
            F::Tags => {
                self.tags.extend(split_tags(value));
                true
            }
        };
        if !accepted {
            self.rejected.push(RejectedValue {
                field,
                raw: value.to_string(),
            });
        }
        accepted
    }

    /// Sets a salary bound from an already numeric value.
    pub fn set_salary(&mut self, field: ApplicationField, amount: f64) -> bool {
        let slot = match field {
            ApplicationField::SalaryMin => &mut self.salary_min,
            ApplicationField::SalaryMax => &mut self.salary_max,
            _ => return false,
        };
        if amount.is_finite() && amount >= 0.0 {
            *slot = Some(amount);
            true
        } else {
            false
        }
    }

    /// The raw text rejected for `field`, if any.
    pub fn rejected_value(&self, field: ApplicationField) -> Option<&str> {
        self.rejected
            .iter()
            .find(|rejected| rejected.field == field)
            .map(|rejected| rejected.raw.as_str())
    }

    /// Returns true when both salary bounds are set and min exceeds max.
    pub fn salary_range_inverted(&self) -> bool {
        matches!((self.salary_min, self.salary_max), (Some(min), Some(max)) if min > max)
    }

    /// Builds the final record, assigning an id and timestamps when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingField`] for the first missing required
    /// field.
    pub fn finalize(self, now: DateTime<Utc>) -> Result<Application, ModelError> {
        let company_name = self
            .company_name
            .ok_or(ModelError::MissingField(ApplicationField::CompanyName))?;
        let position = self
            .position
            .ok_or(ModelError::MissingField(ApplicationField::Position))?;
        let status = self
            .status
            .ok_or(ModelError::MissingField(ApplicationField::Status))?;
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let created_at = self.created_at.unwrap_or(now);

        let mut record = Application::new(id, company_name, position, status, created_at);
        record.updated_at = self.updated_at.unwrap_or(now);
        record.priority = self.priority;
        record.work_type = self.work_type;
        record.employment_type = self.employment_type;
        record.location = self.location;
        record.salary_min = self.salary_min;
        record.salary_max = self.salary_max;
        record.salary_currency = self.salary_currency;
        record.applied_date = self.applied_date;
        record.follow_up_date = self.follow_up_date;
        record.deadline = self.deadline;
        record.job_url = self.job_url;
        record.source = self.source;
        record.contact_name = self.contact_name;
        record.contact_email = self.contact_email;
        record.notes = self.notes;
        record.tags = self.tags;
        Ok(record)
    }
}

fn set_text(slot: &mut Option<String>, value: &str) -> bool {
    *slot = Some(value.to_string());
    true
}

fn set_parsed<T: FromStr>(slot: &mut Option<T>, value: &str) -> bool {
    set_some(slot, value.parse().ok())
}

fn set_some<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    match parsed {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}
