//! CLI argument definitions using clap
//!
//! Commands:
//! - csvdoc convert --input <path> [--from <preset>] [--to <preset>] [--config <path>]
//!   [--columns <name,...>]
//! - csvdoc inspect --input <path> [--dialect <preset>]
//! - csvdoc columns --input <path> [--dialect <preset>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvdoc - dialect-aware CSV reader and writer
#[derive(Parser, Debug)]
#[command(name = "csvdoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite a document in another dialect, printing it to stdout
    Convert {
        /// Source document
        #[arg(long)]
        input: PathBuf,

        /// Source dialect preset (default: config dialect, else windows)
        #[arg(long)]
        from: Option<String>,

        /// Target dialect preset (default: the source dialect)
        #[arg(long)]
        to: Option<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keep only these header columns, in this order. With `strict` set in
        /// the config a missing column is an error, otherwise it is dropped.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Print the tokenized rows as JSON
    Inspect {
        /// Source document
        #[arg(long)]
        input: PathBuf,

        /// Dialect preset
        #[arg(long, default_value = "windows")]
        dialect: String,
    },

    /// Print the columns discovered from the header row as JSON
    Columns {
        /// Source document
        #[arg(long)]
        input: PathBuf,

        /// Dialect preset
        #[arg(long, default_value = "windows")]
        dialect: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "csvdoc", "convert", "--input", "in.csv", "--to", "unix_text",
        ])
        .unwrap();
        match cli.command {
            Command::Convert {
                input,
                from,
                to,
                config,
                columns,
            } => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(from, None);
                assert_eq!(to.as_deref(), Some("unix_text"));
                assert!(config.is_none());
                assert!(columns.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_column_selection() {
        let cli = Cli::try_parse_from([
            "csvdoc", "convert", "--input", "in.csv", "--columns", "name,id",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Convert { ref columns, .. } if columns == &["name", "id"]
        ));
    }

    #[test]
    fn test_inspect_default_dialect() {
        let cli = Cli::try_parse_from(["csvdoc", "inspect", "--input", "a.csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Inspect { ref dialect, .. } if dialect == "windows"
        ));
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["csvdoc", "columns"]).is_err());
    }
}
