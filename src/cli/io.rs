//! Input and output for CLI commands
//!
//! - Input: whole document read from a file, UTF-8 only
//! - Output: CSV text or one JSON document on stdout

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Read a whole document
pub fn read_document(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("failed to read {}: {}", path.display(), e)))
}

/// Write raw text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Write a value as pretty JSON to stdout
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a,b\r\n").unwrap();
        assert_eq!(read_document(file.path()).unwrap(), "a,b\r\n");
    }

    #[test]
    fn test_read_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(&dir.path().join("none.csv")).unwrap_err();
        assert_eq!(err.code(), "CSV_CLI_IO_ERROR");
    }
}
