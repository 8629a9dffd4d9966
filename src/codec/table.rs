//! Dynamic tables
//!
//! Reads documents whose shape is only known at runtime. Fields are
//! discovered from the header row; every cell is kept as text.

use serde::Serialize;

use crate::dialect::Dialect;
use crate::record::{CsvRecord, FieldValues, RecordResult};
use crate::schema::{discover, FieldDescriptor};
use crate::tokenizer::tokenize;
use crate::value::Value;

use super::codec::CsvCodec;
use super::errors::CodecResult;
use super::options::CodecOptions;

/// One row of a `Table`, keyed by column name.
///
/// A column is absent when the source row was too short to reach it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    values: FieldValues,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(column, text);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, text: impl Into<String>) {
        let column: String = column.into();
        let text: String = text.into();
        self.values.insert(column, text);
    }

    /// Text of `column`, `None` when absent
    pub fn get(&self, column: &str) -> Option<&str> {
        match self.values.get(column) {
            Some(Value::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CsvRecord for DynamicRecord {
    fn to_values(&self) -> FieldValues {
        self.values.clone()
    }

    fn from_values(values: FieldValues) -> RecordResult<Self> {
        Ok(Self { values })
    }
}

/// A document read in discovery mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    descriptors: Vec<FieldDescriptor>,
    records: Vec<DynamicRecord>,
}

#[derive(Serialize)]
struct TableJson<'a> {
    columns: Vec<&'a str>,
    rows: Vec<Vec<Option<&'a str>>>,
}

impl Table {
    /// Creates a table with the given column names, in order
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let descriptors = columns
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name: String = name.into();
                FieldDescriptor::text(name).at(index)
            })
            .collect();
        Self {
            descriptors,
            records: Vec::new(),
        }
    }

    /// Column names in position order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(FieldDescriptor::lookup_name)
    }

    /// Discovered column descriptors
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn records(&self) -> &[DynamicRecord] {
        &self.records
    }

    pub fn push(&mut self, record: DynamicRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cell text at data row `row` in `column`
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.records.get(row)?.get(column)
    }

    /// Writes the table in `dialect`.
    ///
    /// Absent cells are written empty.
    pub fn to_csv(&self, dialect: &Dialect, include_header: bool) -> CodecResult<String> {
        let codec = CsvCodec::<DynamicRecord>::new(dialect.clone(), self.descriptors.clone())?
            .with_options(CodecOptions::default().include_header(include_header))?;
        Ok(codec.serialize(&self.records))
    }

    /// Columns and rows as a JSON document; absent cells are `null`
    pub fn to_json(&self) -> serde_json::Result<String> {
        let columns: Vec<&str> = self.columns().collect();
        let rows = self
            .records
            .iter()
            .map(|record| columns.iter().map(|column| record.get(column)).collect())
            .collect();
        serde_json::to_string_pretty(&TableJson { columns, rows })
    }
}

/// Reads a document with a header row into a `Table`.
///
/// Cells beyond the header width are dropped.
///
/// # Errors
///
/// - `Tokenize`: unterminated quoted cell
/// - `Schema(DuplicateHeader)`: the header repeats a column name
pub fn read_table(text: &str, dialect: &Dialect) -> CodecResult<Table> {
    let rows = tokenize(text, dialect)?;
    let Some(header) = rows.first() else {
        return Ok(Table::default());
    };

    let descriptors = discover(header)?;
    let codec = CsvCodec::<DynamicRecord>::new(dialect.clone(), descriptors.clone())?;
    let (_, records) = codec.deserialize_rows(&rows)?;

    Ok(Table {
        descriptors,
        records,
    })
}
