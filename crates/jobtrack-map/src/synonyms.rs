//! Static header synonym table.

use jobtrack_model::ApplicationField;

/// Result of looking up one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Header names exactly one field.
    Field(ApplicationField),
    /// Header names a salary without saying min or max.
    Salary,
    /// Header is not recognized.
    Unknown,
}

/// Normalizes a header for lookup by lowercasing and replacing separators with spaces.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks a header up in the synonym table.
pub fn lookup_header(header: &str) -> HeaderMatch {
    use ApplicationField as F;

    let normalized = normalize_header(header);
    let field = match normalized.as_str() {
        "company" | "company name" | "companyname" | "employer" | "organization"
        | "organisation" | "org" => F::CompanyName,
        "position" | "job title" | "jobtitle" | "title" | "role" | "job" | "job position"
        | "position title" => F::Position,
        "status" | "application status" | "stage" | "state" => F::Status,
        "priority" | "importance" => F::Priority,
        "work type" | "worktype" | "work mode" | "workplace" | "workplace type" | "remote"
        | "work arrangement" | "arrangement" | "location type" => F::WorkType,
        "employment type" | "employmenttype" | "job type" | "type" | "contract type" => {
            F::EmploymentType
        }
        "location" | "city" | "office location" | "place" => F::Location,
        "salary min" | "min salary" | "salarymin" | "minimum salary" | "salary from"
        | "salary low" => F::SalaryMin,
        "salary max" | "max salary" | "salarymax" | "maximum salary" | "salary to"
        | "salary high" => F::SalaryMax,
        "salary" | "compensation" | "pay" | "salary range" | "expected salary"
        | "base salary" => return HeaderMatch::Salary,
        "currency" | "salary currency" | "salarycurrency" => F::SalaryCurrency,
        "applied date" | "application date" | "applied" | "date applied" | "applied on"
        | "applieddate" | "date" => F::AppliedDate,
        "follow up date" | "follow up" | "followup date" | "followupdate" | "followup"
        | "next follow up" => F::FollowUpDate,
        "deadline" | "application deadline" | "closing date" | "due date" => F::Deadline,
        "url" | "job url" | "joburl" | "link" | "job link" | "posting url" | "job posting" => {
            F::JobUrl
        }
        "source" | "job source" | "found via" | "found on" | "platform" => F::Source,
        "contact" | "contact name" | "contactname" | "recruiter" | "hiring manager" => {
            F::ContactName
        }
        "contact email" | "contactemail" | "email" | "recruiter email" => F::ContactEmail,
        "notes" | "note" | "comments" | "comment" | "description" => F::Notes,
        "tags" | "tag" | "labels" | "keywords" => F::Tags,
        _ => return HeaderMatch::Unknown,
    };
    HeaderMatch::Field(field)
}
