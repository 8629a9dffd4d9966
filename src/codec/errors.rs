//! Codec error types
//!
//! Every failure is fatal to the call that raised it; no partial results are
//! returned.
//!
//! Error codes:
//! - CSV_DIALECT_INVALID / CSV_DIALECT_UNKNOWN_PRESET
//! - CSV_MALFORMED_QUOTING
//! - CSV_SCHEMA_CONFIGURATION / CSV_COLUMN_NOT_FOUND / CSV_AMBIGUOUS_COLUMN /
//!   CSV_DUPLICATE_HEADER
//! - CSV_VALUE_CONVERSION
//! - CSV_RECORD_TYPE_MISMATCH / CSV_RECORD_MISSING_FIELD / CSV_RECORD_INVALID

use thiserror::Error;

use crate::dialect::DialectError;
use crate::record::RecordError;
use crate::schema::{FieldType, SchemaError};
use crate::tokenizer::TokenizeError;
use crate::value::ConversionError;

/// Error raised by `CsvCodec` operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// `line` is the 1-based row position in the document, header included.
    #[error(
        "cannot convert value on line {line}, column '{column}' (index {index}) to {target}: {raw:?}"
    )]
    ValueConversion {
        line: usize,
        column: String,
        index: usize,
        raw: String,
        target: FieldType,
        #[source]
        source: ConversionError,
    },

    #[error("cannot build record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl CodecError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Dialect(e) => e.code(),
            CodecError::Tokenize(e) => e.code(),
            CodecError::Schema(e) => e.code(),
            CodecError::ValueConversion { source, .. } => source.code(),
            CodecError::Record { source, .. } => source.code(),
        }
    }

    /// Whether the error comes from codec setup rather than document content
    pub fn is_configuration(&self) -> bool {
        match self {
            CodecError::Dialect(_) => true,
            CodecError::Schema(e) => e.is_configuration(),
            _ => false,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
