//! Error types for the field store

use thiserror::Error;

/// Result type for field store operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised by field construction and field lookups.
///
/// Validation failures are not errors: they live on the record as a
/// non-empty `error` string with `invalid` set.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A declaration or declaration list is malformed
    #[error("{message}")]
    InvalidArgument { message: String },

    /// No field with the requested name exists in the collection
    #[error("no field found with the name: '{name}'")]
    FieldNotFound { name: String },

    /// YAML declaration list could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON declaration list could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldsError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a field not found error
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }

    /// Check if this error came from a lookup by name
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }
}
