use thiserror::Error;

use crate::field::ApplicationField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A value is not a member of a closed enumeration.
    #[error("invalid {kind} value '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    /// A required field was absent when building a record.
    #[error("{} is required", .0.key())]
    MissingField(ApplicationField),
}

pub type Result<T> = std::result::Result<T, ModelError>;
