//! CLI command implementations
//!
//! Commands are thin: they read the input file, call into the library and
//! print the result. All failures propagate as `CliError`.

use std::path::Path;

use crate::cell::format_cell;
use crate::codec::{read_table, CodecOptions, CsvCodec, DynamicRecord};
use crate::config::CodecConfig;
use crate::dialect::{Dialect, DialectPreset};
use crate::schema::{discover, FieldDescriptor};
use crate::tokenizer::{tokenize, Row};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_document, write_json, write_text};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Convert {
            input,
            from,
            to,
            config,
            columns,
        } => {
            let output = convert(
                &input,
                from.as_deref(),
                to.as_deref(),
                config.as_deref(),
                &columns,
            )?;
            write_text(&output)
        }
        Command::Inspect { input, dialect } => {
            let rows = inspect(&input, &dialect)?;
            write_json(&rows)
        }
        Command::Columns { input, dialect } => {
            let columns = columns(&input, &dialect)?;
            write_json(&columns)
        }
    }
}

fn preset_dialect(name: &str) -> CliResult<Dialect> {
    Ok(Dialect::preset(name.parse::<DialectPreset>()?))
}

/// Rewrites a document in another dialect.
///
/// Header documents go through column discovery, so duplicate header names
/// are rejected. Headerless documents are copied row by row. A non-empty
/// `columns` list keeps only those header columns, in that order.
pub fn convert(
    input: &Path,
    from: Option<&str>,
    to: Option<&str>,
    config: Option<&Path>,
    columns: &[String],
) -> CliResult<String> {
    let config = match config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    config.apply_log_level()?;

    let source = match from {
        Some(name) => preset_dialect(name)?,
        None => config.to_dialect()?,
    };
    let target = match to {
        Some(name) => preset_dialect(name)?,
        None => source.clone(),
    };

    let text = read_document(input)?;

    if !columns.is_empty() {
        if !config.header {
            return Err(CliError::new(
                "CSV_CLI_USAGE",
                "--columns selects by header name and needs a header row",
            ));
        }
        return select_columns(&text, &source, &target, columns, &config);
    }

    if config.header {
        let table = read_table(&text, &source)?;
        return Ok(table.to_csv(&target, config.include_header)?);
    }

    let rows = tokenize(&text, &source)?;
    Ok(write_rows(&rows, &target))
}

/// Reads the named columns with the config's strictness and writes them in
/// selection order. In lenient mode columns missing from the header are
/// dropped from the output.
fn select_columns(
    text: &str,
    source: &Dialect,
    target: &Dialect,
    columns: &[String],
    config: &CodecConfig,
) -> CliResult<String> {
    let descriptors: Vec<FieldDescriptor> = columns
        .iter()
        .map(|name| FieldDescriptor::text(name.clone()))
        .collect();

    let reader = CsvCodec::<DynamicRecord>::new(source.clone(), descriptors.clone())?
        .with_options(config.codec_options())?;
    let (schema, records) = reader.deserialize_with_schema(text)?;

    let kept: Vec<FieldDescriptor> = descriptors
        .into_iter()
        .filter(|d| !schema.skipped().contains(&d.field_id))
        .collect();
    let writer = CsvCodec::<DynamicRecord>::new(target.clone(), kept)?
        .with_options(CodecOptions::default().include_header(config.include_header))?;

    Ok(writer.serialize(&records))
}

/// Tokenized rows of a document
pub fn inspect(input: &Path, dialect: &str) -> CliResult<Vec<Row>> {
    let dialect = preset_dialect(dialect)?;
    let text = read_document(input)?;
    Ok(tokenize(&text, &dialect)?)
}

/// Column names and positions from the header row.
///
/// An empty document has no columns.
pub fn columns(input: &Path, dialect: &str) -> CliResult<Vec<ColumnInfo>> {
    let dialect = preset_dialect(dialect)?;
    let text = read_document(input)?;
    let rows = tokenize(&text, &dialect)?;

    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };

    let descriptors = discover(header)?;
    Ok(descriptors
        .iter()
        .map(|d| ColumnInfo {
            name: d.lookup_name().to_string(),
            index: d.declared_index.unwrap_or_default(),
        })
        .collect())
}

/// One discovered column
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub index: usize,
}

fn write_rows(rows: &[Row], dialect: &Dialect) -> String {
    let line_delimiter = dialect.line_delimiter();
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format_cell(cell, dialect))
                .collect::<Vec<_>>()
                .join(dialect.delimiter())
        })
        .map(|line| line + line_delimiter)
        .collect()
}
