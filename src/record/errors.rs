//! Record building errors
//!
//! Error codes:
//! - CSV_RECORD_TYPE_MISMATCH
//! - CSV_RECORD_MISSING_FIELD
//! - CSV_RECORD_INVALID

use thiserror::Error;

use crate::schema::FieldId;

/// Failure while building a record from field values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("field {field} expected {expected} but held {found}")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("required field {field} has no value")]
    MissingField { field: FieldId },

    #[error("invalid record: {0}")]
    Invalid(String),
}

impl RecordError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::TypeMismatch { .. } => "CSV_RECORD_TYPE_MISMATCH",
            RecordError::MissingField { .. } => "CSV_RECORD_MISSING_FIELD",
            RecordError::Invalid(_) => "CSV_RECORD_INVALID",
        }
    }
}

/// Result type for record building
pub type RecordResult<T> = Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = RecordError::MissingField {
            field: FieldId::from("Id"),
        };
        assert_eq!(err.code(), "CSV_RECORD_MISSING_FIELD");
        assert_eq!(err.to_string(), "required field Id has no value");
        assert_eq!(
            RecordError::Invalid("x".into()).code(),
            "CSV_RECORD_INVALID"
        );
    }
}
