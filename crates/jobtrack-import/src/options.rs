use chrono::{DateTime, Utc};
use jobtrack_validate::ValidationOptions;

use crate::duplicate::DuplicatePolicy;

/// Settings for one reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileOptions {
    /// Timestamp given to records that carry none.
    pub now: DateTime<Utc>,
    pub validation: ValidationOptions,
    pub duplicates: DuplicatePolicy,
}

impl ReconcileOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            validation: ValidationOptions::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
