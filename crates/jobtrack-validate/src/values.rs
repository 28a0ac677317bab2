//! Permissive parsing of salary and tag cells.

/// Parses a salary amount.
///
/// Accepts currency symbols, thousands separators, surrounding whitespace
/// and a trailing `k` for thousands (`$120,000`, `120k`, `95 000 €`).
/// Negative, non-finite and empty values are rejected.
pub fn parse_salary(raw: &str) -> Option<f64> {
    let mut cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',' | '_' | '\'') && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let multiplier = if cleaned.ends_with('k') {
        cleaned.pop();
        1000.0
    } else {
        1.0
    };
    if cleaned.is_empty() {
        return None;
    }
    let value = cleaned.parse::<f64>().ok()? * multiplier;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Splits a `;`-separated tag list, trimming tokens and dropping empty ones.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
