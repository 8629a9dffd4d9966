//! CLI module for csvdoc
//!
//! Provides command-line interface for:
//! - convert: Rewrite a document in another dialect
//! - inspect: Show tokenized rows
//! - columns: Show discovered header columns

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{columns, convert, inspect, run, run_command, ColumnInfo};
pub use errors::{CliError, CliResult};
