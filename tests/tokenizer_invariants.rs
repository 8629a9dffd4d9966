//! Tokenizer and Cell Codec Invariant Tests
//!
//! Properties checked across every dialect preset:
//! - Empty input yields no rows
//! - A trailing line delimiter does not change the rows
//! - Quoted cells keep embedded delimiters and quote markers
//! - Formatting then unescaping a cell returns the original value
//! - Formatted cells survive a full tokenize pass

use csvdoc::cell::{format_cell, needs_quoting, unescape};
use csvdoc::dialect::{Dialect, DialectPreset};
use csvdoc::tokenizer::{split_line, tokenize, Row, TokenizeError};

// =============================================================================
// Helper Functions
// =============================================================================

fn all_dialects() -> Vec<Dialect> {
    let mut dialects: Vec<Dialect> = DialectPreset::ALL.iter().copied().map(Dialect::preset).collect();
    dialects.push(Dialect::new("::", "'", "||").unwrap());
    dialects.push(Dialect::new(";", "<q>", "\n").unwrap());
    dialects
}

fn tricky_values(dialect: &Dialect) -> Vec<String> {
    vec![
        String::new(),
        "plain".to_string(),
        "  padded  ".to_string(),
        format!("a{}b", dialect.delimiter()),
        format!("{}leading quote", dialect.quote()),
        format!("trailing quote{}", dialect.quote()),
        format!("mid{}{}quotes", dialect.quote(), dialect.quote()),
        format!("line{}break", dialect.line_delimiter()),
        format!(
            "{}{}{}",
            dialect.quote(),
            dialect.delimiter(),
            dialect.line_delimiter()
        ),
        "ünïcödé ✓".to_string(),
    ]
}

fn write_rows(rows: &[Vec<String>], dialect: &Dialect) -> String {
    rows.iter()
        .map(|row| {
            let cells: Vec<_> = row.iter().map(|v| format_cell(v, dialect)).collect();
            format!("{}{}", cells.join(dialect.delimiter()), dialect.line_delimiter())
        })
        .collect()
}

// =============================================================================
// Tokenizer Properties
// =============================================================================

/// Empty text has no rows in any dialect.
#[test]
fn test_empty_input_yields_no_rows() {
    for dialect in all_dialects() {
        assert_eq!(tokenize("", &dialect).unwrap(), Vec::<Row>::new());
    }
}

/// Appending one line delimiter to non-empty text never changes the rows.
#[test]
fn test_trailing_line_delimiter_insensitive() {
    for dialect in all_dialects() {
        let d = dialect.delimiter();
        let ld = dialect.line_delimiter();
        let texts = [
            format!("a{d}b{ld}c{d}d"),
            "single".to_string(),
            format!("x{d}{d}"),
            format!("a{ld}{ld}b"),
        ];

        for text in texts {
            let without = tokenize(&text, &dialect).unwrap();
            let with = tokenize(&format!("{text}{ld}"), &dialect).unwrap();
            assert_eq!(without, with, "text {text:?}");
        }
    }
}

/// The documented examples for the Windows preset.
#[test]
fn test_windows_examples() {
    let windows = Dialect::preset(DialectPreset::Windows);

    let rows = tokenize("a,\"b,c\",d\r\n", &windows).unwrap();
    assert_eq!(rows, vec![Row::from_iter(["a", "b,c", "d"])]);

    let rows = tokenize("\"He said \"\"hi\"\"\"\r\n", &windows).unwrap();
    assert_eq!(rows, vec![Row::from_iter(["He said \"hi\""])]);
}

/// Rows of formatted cells tokenize back to the original values.
#[test]
fn test_formatted_rows_tokenize_back() {
    for dialect in all_dialects() {
        let values = tricky_values(&dialect);
        let rows = vec![
            values.clone(),
            values.iter().rev().cloned().collect(),
            vec!["last".to_string(), String::new()],
        ];

        let text = write_rows(&rows, &dialect);
        let parsed = tokenize(&text, &dialect).unwrap();

        let expected: Vec<Row> = rows.into_iter().map(Row::new).collect();
        assert_eq!(parsed, expected, "dialect {dialect:?}");
    }
}

/// An unterminated quoted cell aborts the whole parse.
#[test]
fn test_unterminated_quote_aborts() {
    for dialect in all_dialects() {
        let text = format!(
            "ok{ld}{q}never closed{d}x{ld}",
            ld = dialect.line_delimiter(),
            q = dialect.quote(),
            d = dialect.delimiter()
        );
        let err = tokenize(&text, &dialect).unwrap_err();
        assert!(
            matches!(err, TokenizeError::MalformedQuoting { row: 2, .. }),
            "dialect {dialect:?}: {err:?}"
        );
    }
}

// =============================================================================
// Cell Codec Properties
// =============================================================================

/// unescape(format_cell(v)) == v for every value.
#[test]
fn test_cell_round_trip() {
    for dialect in all_dialects() {
        for value in tricky_values(&dialect) {
            let formatted = format_cell(&value, &dialect);
            assert_eq!(unescape(&formatted, &dialect), value, "dialect {dialect:?}");
        }
    }
}

/// A formatted cell is exactly one cell when split on its own.
#[test]
fn test_formatted_cell_is_one_cell() {
    for dialect in all_dialects() {
        for value in tricky_values(&dialect) {
            let formatted = format_cell(&value, &dialect);
            let row = split_line(&formatted, &dialect).unwrap();
            assert_eq!(row.cells(), &[value.clone()], "dialect {dialect:?}");
        }
    }
}

/// Cells touching a neighbouring multi-character delimiter with part of it
/// still split where they were joined.
#[test]
fn test_partial_delimiter_cells_round_trip() {
    let dialects = [
        Dialect::new("::", "\"", "\n").unwrap(),
        Dialect::new("::", "'", "||").unwrap(),
    ];
    let rows = vec![
        vec!["a:".to_string(), "b".to_string()],
        vec![":x".to_string(), "y:".to_string(), "z|".to_string()],
        vec!["|w".to_string(), ":".to_string(), "|".to_string()],
    ];

    for dialect in &dialects {
        let text = write_rows(&rows, dialect);
        let expected: Vec<Row> = rows.iter().map(|r| Row::from_iter(r.iter().cloned())).collect();
        assert_eq!(tokenize(&text, dialect).unwrap(), expected, "text {text:?}");
    }

    let colons = Dialect::new("::", "\"", "\n").unwrap();
    assert_eq!(write_rows(&rows[..1], &colons), "\"a:\"::b\n");
}

/// Values free of special tokens are written verbatim.
#[test]
fn test_plain_values_unquoted() {
    let windows = Dialect::default();
    for value in ["", "abc", "tab\there", "semi;colon"] {
        assert!(!needs_quoting(value, &windows));
        assert_eq!(format_cell(value, &windows), value);
    }
}
