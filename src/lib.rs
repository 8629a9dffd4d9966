//! csvdoc - dialect-aware CSV codec
//!
//! Reads CSV text into typed records and writes records back, with
//! configurable delimiter, quote marker and line delimiter tokens.
//!
//! Layers, bottom-up:
//! - `dialect`: validated token triples and named presets
//! - `tokenizer` / `cell`: text to rows of unescaped cells and back
//! - `schema`: field descriptors resolved to column positions
//! - `value` / `record`: typed values and the record traits
//! - `codec`: the record codec and dynamic tables
//! - `config` / `cli` / `observability`: ambient surface

pub mod cell;
pub mod cli;
pub mod codec;
pub mod config;
pub mod dialect;
pub mod observability;
pub mod record;
pub mod schema;
pub mod tokenizer;
pub mod value;

pub use codec::{read_table, CodecError, CodecOptions, CodecResult, CsvCodec, HeaderMode, Table};
pub use dialect::{Dialect, DialectPreset};
pub use record::{CsvRecord, DescribeFields, FieldValues};
pub use schema::{FieldDescriptor, FieldType};
pub use value::{DefaultConverter, Value, ValueConverter};
