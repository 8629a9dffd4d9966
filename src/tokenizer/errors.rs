//! Tokenizer error types
//!
//! Error codes:
//! - CSV_MALFORMED_QUOTING (aborts the whole parse)

use thiserror::Error;

/// Errors raised while splitting text into rows and cells.
///
/// Once quoting state is corrupted, row boundaries can no longer be trusted,
/// so every tokenizer error aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quoted span was still open at end of text
    #[error("unterminated quoted cell opened on row {row} at byte offset {offset}")]
    MalformedQuoting {
        /// 1-based row in which the span opened
        row: usize,
        /// Byte offset of the opening quote marker
        offset: usize,
    },
}

impl TokenizeError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenizeError::MalformedQuoting { .. } => "CSV_MALFORMED_QUOTING",
        }
    }
}

/// Result type for tokenizer operations
pub type TokenizeResult<T> = Result<T, TokenizeError>;
