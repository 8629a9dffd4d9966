//! CSV dialects
//!
//! A dialect is the triple of special tokens that demarcate a document:
//! - cell delimiter (e.g. `,` or TAB)
//! - quote marker, wrapped around cells that embed special tokens
//! - line delimiter (`\r\n`, `\r` or `\n`)
//!
//! Tokens may be longer than one character. A dialect is validated once at
//! construction and is immutable afterwards.

mod errors;

pub use errors::{DialectError, DialectResult};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named dialect configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectPreset {
    /// `,` cells, `"` quote, CRLF lines
    Windows,
    /// `,` cells, `"` quote, CR lines
    Macintosh,
    /// `,` cells, `"` quote, LF lines
    Unix,
    /// TAB cells, `"` quote, CRLF lines
    WindowsText,
    /// TAB cells, `"` quote, CR lines
    MacintoshText,
    /// TAB cells, `"` quote, LF lines
    UnixText,
}

impl DialectPreset {
    /// All presets, in declaration order
    pub const ALL: [DialectPreset; 6] = [
        DialectPreset::Windows,
        DialectPreset::Macintosh,
        DialectPreset::Unix,
        DialectPreset::WindowsText,
        DialectPreset::MacintoshText,
        DialectPreset::UnixText,
    ];

    /// Returns the preset name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectPreset::Windows => "windows",
            DialectPreset::Macintosh => "macintosh",
            DialectPreset::Unix => "unix",
            DialectPreset::WindowsText => "windows_text",
            DialectPreset::MacintoshText => "macintosh_text",
            DialectPreset::UnixText => "unix_text",
        }
    }

    fn tokens(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            DialectPreset::Windows => (",", "\"", "\r\n"),
            DialectPreset::Macintosh => (",", "\"", "\r"),
            DialectPreset::Unix => (",", "\"", "\n"),
            DialectPreset::WindowsText => ("\t", "\"", "\r\n"),
            DialectPreset::MacintoshText => ("\t", "\"", "\r"),
            DialectPreset::UnixText => ("\t", "\"", "\n"),
        }
    }
}

impl fmt::Display for DialectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectPreset {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        DialectPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == normalized)
            .ok_or_else(|| DialectError::UnknownPreset(s.to_string()))
    }
}

/// A validated set of CSV special tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect {
    delimiter: String,
    quote: String,
    line_delimiter: String,
}

impl Dialect {
    /// Builds a dialect from explicit tokens.
    ///
    /// # Errors
    ///
    /// Returns `DialectError` if any token is empty, if two tokens are equal,
    /// or if the quote marker and a delimiter overlap as prefixes. The cell
    /// delimiter may be a prefix of the line delimiter (or the reverse); the
    /// tokenizer prefers the line delimiter when both match at one offset.
    pub fn new(
        delimiter: impl Into<String>,
        quote: impl Into<String>,
        line_delimiter: impl Into<String>,
    ) -> DialectResult<Self> {
        let dialect = Self {
            delimiter: delimiter.into(),
            quote: quote.into(),
            line_delimiter: line_delimiter.into(),
        };
        dialect.validate()?;
        Ok(dialect)
    }

    /// Builds one of the named presets.
    pub fn preset(preset: DialectPreset) -> Self {
        let (delimiter, quote, line_delimiter) = preset.tokens();
        Self {
            delimiter: delimiter.to_string(),
            quote: quote.to_string(),
            line_delimiter: line_delimiter.to_string(),
        }
    }

    /// Cell delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Quote marker
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Line delimiter
    pub fn line_delimiter(&self) -> &str {
        &self.line_delimiter
    }

    /// Returns the quote marker written twice, the escaped form of a literal quote.
    pub fn doubled_quote(&self) -> String {
        self.quote.repeat(2)
    }

    fn validate(&self) -> DialectResult<()> {
        let tokens = [
            ("delimiter", self.delimiter.as_str()),
            ("quote", self.quote.as_str()),
            ("line delimiter", self.line_delimiter.as_str()),
        ];

        for (token, value) in tokens {
            if value.is_empty() {
                return Err(DialectError::EmptyToken { token });
            }
        }

        if self.delimiter == self.line_delimiter {
            return Err(conflict(tokens[0], tokens[2]));
        }

        // Quote must be distinguishable from both delimiters at every offset
        for other in [tokens[0], tokens[2]] {
            if other.1.starts_with(tokens[1].1) || tokens[1].1.starts_with(other.1) {
                return Err(conflict(other, tokens[1]));
            }
        }

        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::preset(DialectPreset::Windows)
    }
}

impl From<DialectPreset> for Dialect {
    fn from(preset: DialectPreset) -> Self {
        Self::preset(preset)
    }
}

fn conflict(first: (&'static str, &str), second: (&'static str, &str)) -> DialectError {
    DialectError::Conflict {
        first: first.0,
        first_value: first.1.to_string(),
        second: second.0,
        second_value: second.1.to_string(),
    }
}
