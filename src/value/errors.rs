//! Value conversion errors
//!
//! Error codes:
//! - CSV_VALUE_CONVERSION

use thiserror::Error;

use crate::schema::FieldType;

/// Cell text could not be turned into the target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read {text:?} as {target}: {reason}")]
pub struct ConversionError {
    /// Requested type
    pub target: FieldType,
    /// Offending text
    pub text: String,
    /// Why the text was rejected
    pub reason: String,
}

impl ConversionError {
    pub fn new(target: FieldType, text: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            target,
            text: text.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        "CSV_VALUE_CONVERSION"
    }
}

/// Result type for value conversion
pub type ConversionResult<T> = Result<T, ConversionError>;
