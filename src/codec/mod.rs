//! Record codec subsystem
//!
//! `CsvCodec` reads typed records from CSV text and writes them back.
//! `read_table` covers documents whose columns are only known at runtime.

#[allow(clippy::module_inception)]
mod codec;
mod errors;
mod options;
mod table;

pub use codec::CsvCodec;
pub use errors::{CodecError, CodecResult};
pub use options::{CodecOptions, HeaderMode};
pub use table::{read_table, DynamicRecord, Table};
