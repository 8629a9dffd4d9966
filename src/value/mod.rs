//! Typed cell values
//!
//! `Value` is the neutral form a record field takes between its Rust type and
//! its cell text. `FromValue` pulls a concrete type back out of it.

mod converter;
mod errors;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::schema::FieldType;

pub use converter::{DefaultConverter, ValueConverter, DEFAULT_DATETIME_FORMAT};
pub use errors::{ConversionError, ConversionResult};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The field type this value carries, `None` for null
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(FieldType::Text),
            Value::Int(_) => Some(FieldType::Int),
            Value::UInt(_) => Some(FieldType::UInt),
            Value::Float(_) => Some(FieldType::Float),
            Value::Bool(_) => Some(FieldType::Bool),
            Value::Char(_) => Some(FieldType::Char),
            Value::DateTime(_) => Some(FieldType::DateTime),
        }
    }

    /// Name used in type mismatch messages
    pub fn type_name(&self) -> &'static str {
        self.field_type().map_or("null", |t| t.type_name())
    }
}

macro_rules! impl_from_for_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_value! {
    String => Text,
    &str => Text,
    i64 => Int,
    i32 => Int,
    u64 => UInt,
    u32 => UInt,
    f64 => Float,
    bool => Bool,
    char => Char,
    NaiveDateTime => DateTime,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Extracts a concrete type from a `Value`.
///
/// On mismatch the original value is handed back so the caller can report
/// what it actually held.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => Ok(n),
            Value::UInt(n) => i64::try_from(n).map_err(|_| Value::UInt(n)),
            other => Err(other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => i32::try_from(n).map_err(|_| Value::Int(n)),
            other => Err(other),
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::UInt(n) => Ok(n),
            Value::Int(n) => u64::try_from(n).map_err(|_| Value::Int(n)),
            other => Err(other),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::UInt(n) => u32::try_from(n).map_err(|_| Value::UInt(n)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(n) => Ok(n as f64),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(other),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
