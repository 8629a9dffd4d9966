//! CLI-specific error types
//!
//! Every CLI error ends the process with exit code 1. The message printed to
//! stderr is `CODE: message`.

use std::fmt;
use std::io;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::dialect::DialectError;
use crate::schema::SchemaError;
use crate::tokenizer::TokenizeError;

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new("CSV_CLI_IO_ERROR", msg)
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<CodecError> for CliError {
    fn from(e: CodecError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<DialectError> for CliError {
    fn from(e: DialectError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<TokenizeError> for CliError {
    fn from(e: TokenizeError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_code_prefix() {
        let err: CliError = DialectError::UnknownPreset("dos".into()).into();
        assert_eq!(err.code(), "CSV_DIALECT_UNKNOWN_PRESET");
        assert!(err.to_string().starts_with("CSV_DIALECT_UNKNOWN_PRESET: "));
    }
}
