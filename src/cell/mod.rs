//! Cell codec
//!
//! Escaping rules for a single cell value, independent of tokenizer position
//! bookkeeping:
//! - a value containing the delimiter, the quote marker or the line delimiter
//!   is wrapped in quote markers
//! - so is a value that could join a neighbouring multi-character delimiter:
//!   it ends with a proper prefix of one, or starts with a proper suffix
//! - every quote marker inside a wrapped value is doubled
//! - any other value is written unchanged

use std::borrow::Cow;

use crate::dialect::Dialect;

/// Whether `value` must be quoted to survive tokenizing under `dialect`.
pub fn needs_quoting(value: &str, dialect: &Dialect) -> bool {
    value.contains(dialect.quote())
        || value.contains(dialect.delimiter())
        || value.contains(dialect.line_delimiter())
        || overlaps_edge(value, dialect.delimiter())
        || overlaps_edge(value, dialect.line_delimiter())
}

/// Whether `value` ends with a proper prefix of `token` or starts with a
/// proper suffix of it. Always false for single-character tokens.
fn overlaps_edge(value: &str, token: &str) -> bool {
    (1..token.len())
        .filter(|&split| token.is_char_boundary(split))
        .any(|split| value.ends_with(&token[..split]) || value.starts_with(&token[split..]))
}

/// Formats a value as a CSV cell.
pub fn format_cell<'a>(value: &'a str, dialect: &Dialect) -> Cow<'a, str> {
    if !needs_quoting(value, dialect) {
        return Cow::Borrowed(value);
    }

    let quote = dialect.quote();
    let escaped = value.replace(quote, &dialect.doubled_quote());
    let mut cell = String::with_capacity(escaped.len() + 2 * quote.len());
    cell.push_str(quote);
    cell.push_str(&escaped);
    cell.push_str(quote);
    Cow::Owned(cell)
}

/// Reverses [`format_cell`].
///
/// One pair of surrounding quote markers is stripped when present; doubled
/// markers collapse to one.
pub fn unescape(raw: &str, dialect: &Dialect) -> String {
    let quote = dialect.quote();
    let inner = raw
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(raw);
    inner.replace(&dialect.doubled_quote(), quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectPreset;
    use crate::tokenizer::split_line;

    fn windows() -> Dialect {
        Dialect::preset(DialectPreset::Windows)
    }

    #[test]
    fn test_plain_value_borrowed() {
        let cell = format_cell("Row 1", &windows());
        assert!(matches!(cell, Cow::Borrowed("Row 1")));
    }

    #[test]
    fn test_delimiter_triggers_quoting() {
        assert_eq!(format_cell("Row, 2", &windows()), "\"Row, 2\"");
    }

    #[test]
    fn test_quote_is_doubled() {
        assert_eq!(
            format_cell("He said \"hi\"", &windows()),
            "\"He said \"\"hi\"\"\""
        );
    }

    #[test]
    fn test_line_delimiter_triggers_quoting() {
        assert_eq!(format_cell("a\r\nb", &windows()), "\"a\r\nb\"");
        // A lone LF is not the Windows line delimiter
        assert_eq!(format_cell("a\nb", &windows()), "a\nb");
    }

    #[test]
    fn test_empty_value_unchanged() {
        assert_eq!(format_cell("", &windows()), "");
    }

    #[test]
    fn test_unescape_reverses_format() {
        let dialect = windows();
        for value in ["", "plain", "a,b", "\"", "\"\"", "x\r\ny", "say \"no\", twice"] {
            let cell = format_cell(value, &dialect);
            assert_eq!(unescape(&cell, &dialect), value, "value {value:?}");
        }
    }

    #[test]
    fn test_tokenizer_agrees_with_cell_codec() {
        let dialect = windows();
        for value in ["a,b", "\"quoted\"", "multi\r\nline", "trailing\""] {
            let line = format!("{},end", format_cell(value, &dialect));
            let row = split_line(&line, &dialect).unwrap();
            assert_eq!(row.get(0), Some(value));
            assert_eq!(row.get(1), Some("end"));
        }
    }

    #[test]
    fn test_partial_delimiter_at_edges() {
        let dialect = Dialect::new("::", "\"", "\r\n").unwrap();
        assert!(needs_quoting("a:", &dialect));
        assert!(needs_quoting(":a", &dialect));
        assert!(needs_quoting("a\r", &dialect));
        assert!(needs_quoting("\na", &dialect));
        assert!(!needs_quoting("a:b", &dialect));
        assert!(!needs_quoting("a\rb", &dialect));

        // Single-character tokens have no proper prefix
        assert!(!needs_quoting("a", &windows()));
        assert_eq!(format_cell("a\r", &windows()), "\"a\r\"");
    }

    #[test]
    fn test_multi_character_quote() {
        let dialect = Dialect::new(";", "''", "\n").unwrap();
        let cell = format_cell("it''s", &dialect);
        assert_eq!(cell, "''it''''s''");
        assert_eq!(unescape(&cell, &dialect), "it''s");
    }
}
