//! Tokenizer: raw text to rows of cells
//!
//! Quoted cells may embed delimiters, line delimiters and doubled quote
//! markers. Cells come out unescaped: surrounding quote markers are removed
//! and doubled markers are collapsed.
//!
//! Edge cases:
//! - empty text yields no rows
//! - a trailing line delimiter does not yield an empty final row
//! - a blank line in the middle of the text is a row holding one empty cell
//! - an unterminated quoted cell is fatal for the whole parse

mod errors;
mod row;
mod scanner;

pub use errors::{TokenizeError, TokenizeResult};
pub use row::Row;

use crate::dialect::Dialect;

use scanner::Scanner;

/// Splits a whole document into rows.
///
/// # Errors
///
/// Returns `TokenizeError::MalformedQuoting` if a quoted cell is still open at
/// end of text.
pub fn tokenize(text: &str, dialect: &Dialect) -> TokenizeResult<Vec<Row>> {
    let mut scanner = Scanner::new(text, dialect, true);
    let mut rows = Vec::new();
    while let Some(row) = scanner.next_row()? {
        rows.push(row);
    }
    Ok(rows)
}

/// Splits a single line into its cells.
///
/// Line delimiters are ordinary text here. An empty line is one empty cell.
pub fn split_line(line: &str, dialect: &Dialect) -> TokenizeResult<Row> {
    let mut scanner = Scanner::new(line, dialect, false);
    Ok(scanner
        .next_row()?
        .unwrap_or_else(|| Row::new(vec![String::new()])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectPreset;

    fn windows() -> Dialect {
        Dialect::preset(DialectPreset::Windows)
    }

    fn cells(rows: &[Row]) -> Vec<Vec<&str>> {
        rows.iter().map(|r| r.iter().collect()).collect()
    }

    #[test]
    fn test_empty_text_yields_no_rows() {
        assert!(tokenize("", &windows()).unwrap().is_empty());
    }

    #[test]
    fn test_simple_rows() {
        let rows = tokenize("a,b,c\r\n1,2,3\r\n", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_trailing_line_delimiter_is_optional() {
        let with = tokenize("a,b\r\nc,d\r\n", &windows()).unwrap();
        let without = tokenize("a,b\r\nc,d", &windows()).unwrap();
        assert_eq!(with, without);
        assert_eq!(with.len(), 2);
    }

    #[test]
    fn test_quoted_embedded_delimiter() {
        let rows = tokenize("a,\"b,c\",d\r\n", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b,c", "d"]]);
    }

    #[test]
    fn test_doubled_quote_escaping() {
        let rows = tokenize("\"He said \"\"hi\"\"\"\r\n", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["He said \"hi\""]]);
    }

    #[test]
    fn test_quoted_line_delimiter_stays_in_cell() {
        let rows = tokenize("\"line 1\r\nline 2\",x\r\ny,z\r\n", &windows()).unwrap();
        assert_eq!(
            cells(&rows),
            vec![vec!["line 1\r\nline 2", "x"], vec!["y", "z"]]
        );
    }

    #[test]
    fn test_empty_cells_preserved() {
        let rows = tokenize(",a,,\r\n", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["", "a", "", ""]]);
    }

    #[test]
    fn test_quoted_empty_cell() {
        let rows = tokenize("\"\",x", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["", "x"]]);
    }

    #[test]
    fn test_blank_line_is_single_empty_cell() {
        let rows = tokenize("a\r\n\r\nb\r\n", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_doubled_quote_mid_cell_is_literal() {
        let rows = tokenize("5\"\"6,x", &windows()).unwrap();
        assert_eq!(cells(&rows), vec![vec!["5\"6", "x"]]);
    }

    #[test]
    fn test_unterminated_quote_is_fatal() {
        let err = tokenize("a,b\r\nc,\"open\r\n", &windows()).unwrap_err();
        assert_eq!(err, TokenizeError::MalformedQuoting { row: 2, offset: 7 });
        assert_eq!(err.code(), "CSV_MALFORMED_QUOTING");
    }

    #[test]
    fn test_ragged_rows() {
        let rows = tokenize("a,b,c\nd\n", &Dialect::preset(DialectPreset::Unix)).unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_tab_dialect() {
        let rows = tokenize("a\tb,c\n", &Dialect::preset(DialectPreset::UnixText)).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn test_multi_character_tokens() {
        let dialect = Dialect::new("::", "'", "||").unwrap();
        let rows = tokenize("a::'b::c'||d::''''||", &dialect).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b::c"], vec!["d", "'"]]);
    }

    #[test]
    fn test_line_delimiter_beats_prefix_delimiter() {
        let dialect = Dialect::new("\r", "\"", "\r\n").unwrap();
        let rows = tokenize("a\rb\r\nc\r\n", &dialect).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_macintosh_line_endings() {
        let rows = tokenize("a,b\rc,d\r", &Dialect::preset(DialectPreset::Macintosh)).unwrap();
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_split_line() {
        let row = split_line("x,\"y\r\nz\",", &windows()).unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["x", "y\r\nz", ""]);
    }

    #[test]
    fn test_split_line_ignores_line_delimiter() {
        let row = split_line("a\r\nb,c", &windows()).unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["a\r\nb", "c"]);
    }

    #[test]
    fn test_split_empty_line() {
        let row = split_line("", &windows()).unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![""]);
    }
}
