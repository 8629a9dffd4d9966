//! Pluggable text <-> value conversion
//!
//! The codec never inspects a target type itself; it hands cell text to a
//! `ValueConverter`. Empty text in a nullable column is the only case decided
//! without the converter.

use chrono::{NaiveDate, NaiveDateTime};

use crate::schema::FieldType;

use super::errors::{ConversionError, ConversionResult};
use super::Value;

/// Converts between cell text and typed values.
pub trait ValueConverter {
    /// Formats a value for writing. Never called with `Value::Null`.
    fn to_text(&self, value: &Value) -> String;

    /// Parses cell text into a value of type `target`.
    fn from_text(&self, text: &str, target: FieldType) -> ConversionResult<Value>;
}

/// Default date-time layout used for writing.
///
/// `%.f` prints nothing for whole seconds and 3, 6 or 9 digits otherwise.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Layouts accepted when reading date-times, tried in order
const DATETIME_READ_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
];

/// Built-in converter.
///
/// - bool: written as `True` / `False`; read case-insensitively
/// - numbers: surrounding whitespace ignored on read
/// - char: exactly one character
/// - datetime: written with `datetime_format`; read with that format, ISO 8601
///   layouts, or a bare `YYYY-MM-DD` date (midnight)
#[derive(Debug, Clone)]
pub struct DefaultConverter {
    datetime_format: String,
}

impl Default for DefaultConverter {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl DefaultConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom chrono format string for date-times
    pub fn with_datetime_format(format: impl Into<String>) -> Self {
        Self {
            datetime_format: format.into(),
        }
    }

    fn parse_datetime(&self, text: &str) -> ConversionResult<NaiveDateTime> {
        let text = text.trim();
        std::iter::once(self.datetime_format.as_str())
            .chain(DATETIME_READ_FORMATS)
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| {
                ConversionError::new(FieldType::DateTime, text, "unrecognised date-time layout")
            })
    }
}

impl ValueConverter for DefaultConverter {
    fn to_text(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Char(c) => c.to_string(),
            Value::DateTime(dt) => dt.format(&self.datetime_format).to_string(),
        }
    }

    fn from_text(&self, text: &str, target: FieldType) -> ConversionResult<Value> {
        let fail = |reason: &dyn ToString| ConversionError::new(target, text, reason.to_string());

        match target {
            FieldType::Text => Ok(Value::Text(text.to_string())),
            FieldType::Int => text.trim().parse().map(Value::Int).map_err(|e| fail(&e)),
            FieldType::UInt => text.trim().parse().map(Value::UInt).map_err(|e| fail(&e)),
            FieldType::Float => text.trim().parse().map(Value::Float).map_err(|e| fail(&e)),
            FieldType::Bool => match text.trim() {
                t if t.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                t if t.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                _ => Err(fail(&"expected True or False")),
            },
            FieldType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(fail(&"expected exactly one character")),
                }
            }
            FieldType::DateTime => self.parse_datetime(text).map(Value::DateTime),
        }
    }
}
