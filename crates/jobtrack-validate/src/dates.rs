//! Permissive date parsing for imported cells.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Formats tried in order after ISO 8601. Slash dates are read month first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Years outside this range are treated as typos (`01/05/24`).
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Parses a calendar date from the common spreadsheet spellings.
///
/// Timestamps are accepted too; their time of day is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| parse_timestamp(value).map(|ts| ts.date_naive()))?;
    YEAR_RANGE.contains(&date.year()).then_some(date)
}

/// Parses a point in time. Offsets are converted to UTC; naive values are
/// taken as UTC; a bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(naive) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
