/// How the CSV path treats optional values it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionalFieldPolicy {
    /// Drop the value and keep the record.
    #[default]
    Lenient,
    /// Report the value as a validation error, like the JSON path does.
    Strict,
}

/// Validation settings shared by both import paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub optional_fields: OptionalFieldPolicy,
}

impl ValidationOptions {
    /// Options that report unparsable optional CSV values.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            optional_fields: OptionalFieldPolicy::Strict,
        }
    }

    #[must_use]
    pub fn with_optional_fields(mut self, policy: OptionalFieldPolicy) -> Self {
        self.optional_fields = policy;
        self
    }
}
