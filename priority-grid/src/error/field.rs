//! FieldError for record accessors

/// Error type for field access operations on a source record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the record.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },

    /// The field exists but has a different type than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The host accessor itself failed while resolving the field.
    #[error("Accessor for field '{field}' failed: {message}")]
    Accessor { field: String, message: String },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a new accessor failure.
    pub fn accessor(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Accessor {
            field: field.into(),
            message: message.into(),
        }
    }
}
