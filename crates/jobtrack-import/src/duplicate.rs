//! Matching imported records against existing ones.

use jobtrack_model::Application;
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};

/// How an imported record is compared with existing records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Company name and position equal after trimming, ignoring case.
    #[default]
    Exact,
    /// Exact matches, plus pairs whose company name and position are both
    /// at least `threshold` similar (Jaro-Winkler, 0.0 to 1.0).
    Fuzzy { threshold: f64 },
}

impl DuplicatePolicy {
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.92;

    /// A fuzzy policy with `threshold` clamped to `0.0..=1.0`.
    #[must_use]
    pub fn fuzzy(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            Self::DEFAULT_FUZZY_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self::Fuzzy { threshold }
    }

    /// Returns true when `candidate` counts as the same application as
    /// `existing`.
    pub fn matches(&self, candidate: &Application, existing: &Application) -> bool {
        let company = (
            normalize(&candidate.company_name),
            normalize(&existing.company_name),
        );
        let position = (
            normalize(&candidate.position),
            normalize(&existing.position),
        );
        if company.0 == company.1 && position.0 == position.1 {
            return true;
        }
        match self {
            Self::Exact => false,
            Self::Fuzzy { threshold } => {
                similarity(&company.0, &company.1) >= *threshold
                    && similarity(&position.0, &position.1) >= *threshold
            }
        }
    }
}

/// First existing record that `candidate` duplicates under `policy`.
pub fn find_duplicate<'a>(
    candidate: &Application,
    existing: &'a [Application],
    policy: DuplicatePolicy,
) -> Option<&'a Application> {
    existing.iter().find(|record| policy.matches(candidate, record))
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler::similarity(a.chars(), b.chars())
}
