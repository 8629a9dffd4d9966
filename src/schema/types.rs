//! Field descriptors and resolved column schemas
//!
//! Supported value types:
//! - text: UTF-8 string, passed through unchanged
//! - int / uint: 64-bit integers
//! - float: 64-bit floating point
//! - bool
//! - char: exactly one character
//! - datetime: naive date and time

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokenizer::Row;

/// Opaque identity of a record field, used only as a map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldId(Cow<'static, str>);

impl FieldId {
    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FieldId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Int,
    UInt,
    Float,
    Bool,
    Char,
    DateTime,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Int => "int",
            FieldType::UInt => "uint",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Char => "char",
            FieldType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Column metadata declared by one record field.
///
/// Built with chained setters:
///
/// ```
/// use csvdoc::schema::{FieldDescriptor, FieldType};
///
/// let field = FieldDescriptor::new("integer", FieldType::Int)
///     .named("Integer Column")
///     .at(1);
/// assert_eq!(field.lookup_name(), "Integer Column");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    /// Field identity
    pub field_id: FieldId,
    /// Column name, when it differs from the field id
    pub declared_name: Option<String>,
    /// Explicit column position; `None` means no position requested
    pub declared_index: Option<usize>,
    /// Ignored fields are neither read nor written
    pub ignored: bool,
    /// Target type for value conversion
    pub field_type: FieldType,
    /// Empty text reads as null instead of going through the converter
    pub nullable: bool,
}

impl FieldDescriptor {
    /// Create a descriptor with no declared name or index
    pub fn new(field_id: impl Into<FieldId>, field_type: FieldType) -> Self {
        Self {
            field_id: field_id.into(),
            declared_name: None,
            declared_index: None,
            ignored: false,
            field_type,
            nullable: false,
        }
    }

    /// Create a text field
    pub fn text(field_id: impl Into<FieldId>) -> Self {
        Self::new(field_id, FieldType::Text)
    }

    /// Create a signed integer field
    pub fn int(field_id: impl Into<FieldId>) -> Self {
        Self::new(field_id, FieldType::Int)
    }

    /// Create a bool field
    pub fn bool(field_id: impl Into<FieldId>) -> Self {
        Self::new(field_id, FieldType::Bool)
    }

    /// Create a float field
    pub fn float(field_id: impl Into<FieldId>) -> Self {
        Self::new(field_id, FieldType::Float)
    }

    /// Declare the column name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.declared_name = Some(name.into());
        self
    }

    /// Declare the column position
    pub fn at(mut self, index: usize) -> Self {
        self.declared_index = Some(index);
        self
    }

    /// Exclude the field from reading and writing
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Read empty cells as null
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Column name looked up in a header row
    pub fn lookup_name(&self) -> &str {
        self.declared_name
            .as_deref()
            .unwrap_or_else(|| self.field_id.as_str())
    }
}

/// A field bound to a concrete column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedColumn {
    pub field_id: FieldId,
    pub name: String,
    pub index: usize,
    pub field_type: FieldType,
    pub nullable: bool,
}

impl ResolvedColumn {
    pub(crate) fn bind(descriptor: &FieldDescriptor, index: usize) -> Self {
        Self {
            field_id: descriptor.field_id.clone(),
            name: descriptor.lookup_name().to_string(),
            index,
            field_type: descriptor.field_type,
            nullable: descriptor.nullable,
        }
    }
}

/// Resolved column mapping for one document.
///
/// Columns are kept in writer order: index ascending, name as tie-break.
/// Indices are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    columns: Vec<ResolvedColumn>,
    /// Fields with no matching column in this document (lenient mode)
    skipped: Vec<FieldId>,
}

impl ColumnSchema {
    pub(crate) fn new(mut columns: Vec<ResolvedColumn>, skipped: Vec<FieldId>) -> Self {
        columns.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
        Self { columns, skipped }
    }

    /// Columns in writer order
    pub fn columns(&self) -> &[ResolvedColumn] {
        &self.columns
    }

    /// Fields skipped for this document
    pub fn skipped(&self) -> &[FieldId] {
        &self.skipped
    }

    /// Number of bound columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no field is bound
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column bound to `field_id`
    pub fn column_for(&self, field_id: &str) -> Option<&ResolvedColumn> {
        self.columns
            .iter()
            .find(|column| column.field_id.as_str() == field_id)
    }

    /// Column bound at `index`
    pub fn column_at(&self, index: usize) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|column| column.index == index)
    }

    /// Resolved names in writer order
    pub fn header_row(&self) -> Row {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }
}
