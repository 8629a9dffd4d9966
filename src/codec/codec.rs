//! Record codec
//!
//! Orchestrates tokenizer, schema resolver and value converter.
//!
//! Read flow:
//! 1. Tokenize the whole text
//! 2. Resolve the column schema (header row or declared indices)
//! 3. For each data row, convert every bound cell present in the row
//! 4. Build the record from the collected values
//!
//! Write flow:
//! 1. Optional header row of resolved names
//! 2. One row per record, columns in writer order
//! 3. Rows joined by the line delimiter, output terminated by one

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cell::format_cell;
use crate::dialect::Dialect;
use crate::observability::{log_event, CodecMetrics, Event};
use crate::record::{CsvRecord, DescribeFields, FieldValues};
use crate::schema::{
    for_writing, resolve, ColumnSchema, FieldDescriptor, ResolvedColumn, SchemaCache,
};
use crate::tokenizer::{tokenize, Row};
use crate::value::{ConversionError, DefaultConverter, Value, ValueConverter};

use super::errors::{CodecError, CodecResult};
use super::options::{CodecOptions, HeaderMode};

/// Reads and writes records of type `T`.
///
/// The codec is immutable during a call and can be shared across threads.
/// Schemas resolved from a header are returned to the caller, never stored
/// on the codec; an attached `SchemaCache` is the only shared state.
pub struct CsvCodec<T, C = DefaultConverter> {
    dialect: Dialect,
    descriptors: Vec<FieldDescriptor>,
    options: CodecOptions,
    converter: C,
    writer_schema: Arc<ColumnSchema>,
    /// Declared-index schema, present in headerless mode
    index_schema: Option<Arc<ColumnSchema>>,
    cache: Option<Arc<SchemaCache>>,
    metrics: Option<Arc<CodecMetrics>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> CsvCodec<T> {
    /// Creates a codec with default options and the default converter.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Schema` if the descriptors declare the same field
    /// or the same index twice.
    pub fn new(dialect: Dialect, descriptors: Vec<FieldDescriptor>) -> CodecResult<Self> {
        let writer_schema = Arc::new(for_writing(&descriptors)?);
        Ok(Self {
            dialect,
            descriptors,
            options: CodecOptions::default(),
            converter: DefaultConverter::default(),
            writer_schema,
            index_schema: None,
            cache: None,
            metrics: None,
            _record: PhantomData,
        })
    }
}

impl<T: DescribeFields> CsvCodec<T> {
    /// Creates a codec from the record type's own descriptors
    pub fn for_record(dialect: Dialect) -> CodecResult<Self> {
        Self::new(dialect, T::descriptors())
    }
}

impl<T, C> CsvCodec<T, C> {
    /// Replaces the options.
    ///
    /// # Errors
    ///
    /// In headerless mode every active field needs a declared index; a
    /// missing or duplicated one is reported here, before any document is
    /// read.
    pub fn with_options(mut self, options: CodecOptions) -> CodecResult<Self> {
        self.index_schema = match options.header_mode {
            HeaderMode::FirstRow => None,
            HeaderMode::None => Some(Arc::new(resolve(&self.descriptors, None, options.strict)?)),
        };
        self.options = options;
        Ok(self)
    }

    /// Swaps the value converter
    pub fn with_converter<D>(self, converter: D) -> CsvCodec<T, D> {
        CsvCodec {
            dialect: self.dialect,
            descriptors: self.descriptors,
            options: self.options,
            converter,
            writer_schema: self.writer_schema,
            index_schema: self.index_schema,
            cache: self.cache,
            metrics: self.metrics,
            _record: PhantomData,
        }
    }

    /// Shares resolved header schemas through `cache`
    pub fn with_schema_cache(mut self, cache: Arc<SchemaCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Reports counters into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<CodecMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Uses another dialect for subsequent calls
    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Schema used by `serialize`
    pub fn writer_schema(&self) -> &ColumnSchema {
        &self.writer_schema
    }

    pub fn metrics(&self) -> Option<&CodecMetrics> {
        self.metrics.as_deref()
    }

    /// Resolves the schema for a document with the given header row.
    ///
    /// `None` resolves from declared indices alone.
    pub fn resolve_schema(&self, header: Option<&Row>) -> CodecResult<Arc<ColumnSchema>> {
        let schema = match (header, &self.index_schema) {
            (None, Some(schema)) => Arc::clone(schema),
            _ => self.resolve_uncached_or_cached(header)?,
        };

        let columns = schema.len().to_string();
        let skipped = schema.skipped().len().to_string();
        log_event(
            Event::SchemaResolved,
            &[("columns", columns.as_str()), ("skipped", skipped.as_str())],
        );

        for field in schema.skipped() {
            log_event(Event::ColumnSkipped, &[("field", field.as_str())]);
        }
        self.with_metrics_sink(|m| m.add_columns_skipped(schema.skipped().len() as u64));

        Ok(schema)
    }

    fn resolve_uncached_or_cached(&self, header: Option<&Row>) -> CodecResult<Arc<ColumnSchema>> {
        let strict = self.options.strict;

        let Some(cache) = &self.cache else {
            self.with_metrics_sink(CodecMetrics::increment_schema_resolutions);
            return Ok(Arc::new(resolve(&self.descriptors, header, strict)?));
        };

        let (schema, hit) = cache.lookup(&self.descriptors, header, strict)?;
        if hit {
            log_event(Event::SchemaCacheHit, &[]);
            self.with_metrics_sink(CodecMetrics::increment_schema_cache_hits);
        } else {
            self.with_metrics_sink(CodecMetrics::increment_schema_resolutions);
        }
        Ok(schema)
    }

    fn with_metrics_sink(&self, f: impl FnOnce(&CodecMetrics)) {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }
}

impl<T: CsvRecord, C: ValueConverter> CsvCodec<T, C> {
    /// Reads every record in `text`.
    ///
    /// # Errors
    ///
    /// - `Tokenize`: unterminated quoted cell
    /// - `Schema`: header does not fit the descriptors
    /// - `ValueConversion`: a cell could not be converted
    /// - `Record`: the record type rejected its values
    pub fn deserialize(&self, text: &str) -> CodecResult<Vec<T>> {
        self.deserialize_with_schema(text).map(|(_, records)| records)
    }

    /// Like `deserialize`, also returning the schema the document resolved to
    pub fn deserialize_with_schema(
        &self,
        text: &str,
    ) -> CodecResult<(Arc<ColumnSchema>, Vec<T>)> {
        let rows = tokenize(text, &self.dialect)?;

        let count = rows.len().to_string();
        log_event(Event::DocumentTokenized, &[("rows", count.as_str())]);
        self.with_metrics_sink(|m| m.add_rows_tokenized(rows.len() as u64));

        self.deserialize_rows(&rows)
    }

    /// Reads records from already tokenized rows.
    ///
    /// In header mode `rows[0]` is the header. An empty slice yields no
    /// records and an empty schema.
    pub fn deserialize_rows(&self, rows: &[Row]) -> CodecResult<(Arc<ColumnSchema>, Vec<T>)> {
        let (schema, data, first_line) = match self.options.header_mode {
            HeaderMode::FirstRow => match rows.split_first() {
                None => return Ok((Arc::new(ColumnSchema::default()), Vec::new())),
                Some((header, data)) => (self.resolve_schema(Some(header))?, data, 2),
            },
            HeaderMode::None => (self.resolve_schema(None)?, rows, 1),
        };

        let records = data
            .iter()
            .enumerate()
            .map(|(i, row)| self.read_row(&schema, row, first_line + i))
            .collect::<CodecResult<Vec<T>>>()?;

        let count = records.len().to_string();
        log_event(Event::RecordsRead, &[("records", count.as_str())]);
        self.with_metrics_sink(|m| m.add_records_read(records.len() as u64));

        Ok((schema, records))
    }

    fn read_row(&self, schema: &ColumnSchema, row: &Row, line: usize) -> CodecResult<T> {
        let mut values = FieldValues::new();

        for column in schema.columns() {
            let Some(raw) = row.get(column.index) else {
                continue;
            };

            let value = if column.nullable && raw.is_empty() {
                Value::Null
            } else {
                self.converter
                    .from_text(raw, column.field_type)
                    .map_err(|source| self.conversion_failed(column, raw, line, source))?
            };
            values.insert(column.field_id.clone(), value);
        }

        T::from_values(values).map_err(|source| CodecError::Record { line, source })
    }

    fn conversion_failed(
        &self,
        column: &ResolvedColumn,
        raw: &str,
        line: usize,
        source: ConversionError,
    ) -> CodecError {
        let line_text = line.to_string();
        log_event(
            Event::ConversionFailed,
            &[
                ("line", line_text.as_str()),
                ("column", column.name.as_str()),
                ("target", column.field_type.type_name()),
            ],
        );
        self.with_metrics_sink(CodecMetrics::increment_conversion_failures);

        CodecError::ValueConversion {
            line,
            column: column.name.clone(),
            index: column.index,
            raw: raw.to_string(),
            target: column.field_type,
            source,
        }
    }

    /// Writes records with the codec's own writer schema
    pub fn serialize<'r, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'r T>,
        T: 'r,
    {
        self.serialize_with_schema(records, &self.writer_schema)
    }

    /// Writes records with a schema obtained from a previous read.
    ///
    /// Fields the schema skipped are not written.
    pub fn serialize_with_schema<'r, I>(&self, records: I, schema: &ColumnSchema) -> String
    where
        I: IntoIterator<Item = &'r T>,
        T: 'r,
    {
        let mut lines = Vec::new();

        if self.options.include_header {
            lines.push(self.format_row(schema.columns().iter().map(|c| c.name.as_str())));
        }

        let mut written = 0u64;
        for record in records {
            let values = record.to_values();
            let cells: Vec<String> = schema
                .columns()
                .iter()
                .map(|column| match values.get(column.field_id.as_str()) {
                    None | Some(Value::Null) => String::new(),
                    Some(value) => self.converter.to_text(value),
                })
                .collect();
            lines.push(self.format_row(cells.iter().map(String::as_str)));
            written += 1;
        }

        let count = written.to_string();
        log_event(Event::RecordsWritten, &[("records", count.as_str())]);
        self.with_metrics_sink(|m| m.add_records_written(written));

        if lines.is_empty() {
            return String::new();
        }

        let line_delimiter = self.dialect.line_delimiter();
        let mut text = lines.join(line_delimiter);
        text.push_str(line_delimiter);
        text
    }

    fn format_row<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        cells
            .map(|cell| format_cell(cell, &self.dialect))
            .collect::<Vec<_>>()
            .join(self.dialect.delimiter())
    }
}

impl<T, C> fmt::Debug for CsvCodec<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvCodec")
            .field("dialect", &self.dialect)
            .field("descriptors", &self.descriptors)
            .field("options", &self.options)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
