//! Dialect error types
//!
//! Error codes:
//! - CSV_DIALECT_INVALID (configuration, raised at construction)
//! - CSV_DIALECT_UNKNOWN_PRESET (configuration)

use thiserror::Error;

/// Errors raised while building a [`Dialect`](super::Dialect).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// A dialect token was the empty string
    #[error("dialect {token} must not be empty")]
    EmptyToken {
        /// Which token was empty ("delimiter", "quote", "line delimiter")
        token: &'static str,
    },

    /// Two dialect tokens collide (equal, or one is a prefix of the other)
    #[error("dialect {first} {first_value:?} conflicts with {second} {second_value:?}")]
    Conflict {
        first: &'static str,
        first_value: String,
        second: &'static str,
        second_value: String,
    },

    /// Preset name not recognised
    #[error("unknown dialect preset '{0}'")]
    UnknownPreset(String),
}

impl DialectError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DialectError::EmptyToken { .. } | DialectError::Conflict { .. } => {
                "CSV_DIALECT_INVALID"
            }
            DialectError::UnknownPreset(_) => "CSV_DIALECT_UNKNOWN_PRESET",
        }
    }
}

/// Result type for dialect construction
pub type DialectResult<T> = Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DialectError::EmptyToken { token: "quote" }.code(),
            "CSV_DIALECT_INVALID"
        );
        assert_eq!(
            DialectError::UnknownPreset("dos".into()).code(),
            "CSV_DIALECT_UNKNOWN_PRESET"
        );
    }

    #[test]
    fn test_conflict_display_names_both_tokens() {
        let err = DialectError::Conflict {
            first: "delimiter",
            first_value: ",".into(),
            second: "quote",
            second_value: ",".into(),
        };
        let display = err.to_string();
        assert!(display.contains("delimiter"));
        assert!(display.contains("quote"));
    }
}
