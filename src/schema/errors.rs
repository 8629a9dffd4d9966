//! Schema resolution error types
//!
//! Error codes:
//! - CSV_SCHEMA_CONFIGURATION (index required but missing, duplicate index/field)
//! - CSV_COLUMN_NOT_FOUND (strict header mode only)
//! - CSV_AMBIGUOUS_COLUMN (duplicate header name, no usable index)
//! - CSV_DUPLICATE_HEADER (header-driven discovery)

use thiserror::Error;

use super::types::FieldId;

/// Errors raised while mapping fields to columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No header row is used and the field declares no column index
    #[error("field '{field}' needs a declared column index when headers are not used")]
    MissingIndex { field: FieldId },

    /// Two fields claim the same column
    #[error("column {index} is claimed by both '{first}' and '{second}'")]
    DuplicateIndex {
        index: usize,
        first: FieldId,
        second: FieldId,
    },

    /// The same field id is described twice
    #[error("field '{field}' is described more than once")]
    DuplicateField { field: FieldId },

    /// Strict mode and no header cell matches the field's column name
    #[error("no column named '{column}' for field '{field}'")]
    ColumnNotFound { field: FieldId, column: String },

    /// The header repeats the column name and the declared index does not
    /// point at one of the repeats
    #[error(
        "column '{column}' for field '{field}' appears at {matches:?}; \
         declared index {declared_index:?} does not select one of them"
    )]
    AmbiguousColumn {
        field: FieldId,
        column: String,
        matches: Vec<usize>,
        declared_index: Option<usize>,
    },

    /// Header-driven discovery found a repeated column name
    #[error("header name '{name}' repeats at columns {first} and {second}")]
    DuplicateHeader {
        name: String,
        first: usize,
        second: usize,
    },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::MissingIndex { .. }
            | SchemaError::DuplicateIndex { .. }
            | SchemaError::DuplicateField { .. } => "CSV_SCHEMA_CONFIGURATION",
            SchemaError::ColumnNotFound { .. } => "CSV_COLUMN_NOT_FOUND",
            SchemaError::AmbiguousColumn { .. } => "CSV_AMBIGUOUS_COLUMN",
            SchemaError::DuplicateHeader { .. } => "CSV_DUPLICATE_HEADER",
        }
    }

    /// Whether the error stems from the descriptors alone, independent of
    /// any document
    pub fn is_configuration(&self) -> bool {
        self.code() == "CSV_SCHEMA_CONFIGURATION"
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
