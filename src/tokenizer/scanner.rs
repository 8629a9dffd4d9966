//! Cursor over document text
//!
//! The scanner walks the text once, jumping between occurrences of the three
//! dialect tokens. Next-match offsets are cached per token so that a token
//! that never occurs (no quotes in a file, say) is searched for only once.

use memchr::memmem::Finder;

use crate::dialect::Dialect;

use super::errors::{TokenizeError, TokenizeResult};
use super::row::Row;

/// Token found by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Quote,
    Delimiter,
    LineDelimiter,
}

/// How a cell ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Cell,
    Line,
    End,
}

/// Cached forward search for one token.
struct Lookahead<'a> {
    finder: Finder<'a>,
    /// Absolute offset of the last match found
    next: Option<usize>,
    /// No match remains anywhere past the last search position
    exhausted: bool,
}

impl<'a> Lookahead<'a> {
    fn new(needle: &'a str) -> Self {
        Self {
            finder: Finder::new(needle.as_bytes()),
            next: None,
            exhausted: false,
        }
    }

    fn len(&self) -> usize {
        self.finder.needle().len()
    }

    /// First match at or after `pos`.
    fn find_from(&mut self, haystack: &[u8], pos: usize) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        if let Some(next) = self.next {
            if next >= pos {
                return Some(next);
            }
        }
        match self.finder.find(&haystack[pos..]) {
            Some(relative) => {
                self.next = Some(pos + relative);
                self.next
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

/// Row-at-a-time scanner over a whole document.
pub(super) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    /// 1-based number of the row being read
    row: usize,
    quote: &'a str,
    quotes: Lookahead<'a>,
    delimiters: Lookahead<'a>,
    /// `None` when line delimiters are plain text (single-line mode)
    lines: Option<Lookahead<'a>>,
}

impl<'a> Scanner<'a> {
    pub(super) fn new(text: &'a str, dialect: &'a Dialect, split_lines: bool) -> Self {
        Self {
            text,
            pos: 0,
            row: 0,
            quote: dialect.quote(),
            quotes: Lookahead::new(dialect.quote()),
            delimiters: Lookahead::new(dialect.delimiter()),
            lines: split_lines.then(|| Lookahead::new(dialect.line_delimiter())),
        }
    }

    /// Reads the next row, or `None` once the text is consumed.
    ///
    /// A line delimiter that ends the text does not start another row.
    pub(super) fn next_row(&mut self) -> TokenizeResult<Option<Row>> {
        if self.pos >= self.text.len() {
            return Ok(None);
        }
        self.row += 1;

        let mut cells = Vec::new();
        loop {
            let (cell, boundary) = self.read_cell()?;
            cells.push(cell);
            if boundary != Boundary::Cell {
                break;
            }
        }
        Ok(Some(Row::new(cells)))
    }

    fn read_cell(&mut self) -> TokenizeResult<(String, Boundary)> {
        let start = self.pos;
        let mut cell = String::new();

        loop {
            let Some((token, offset, len)) = self.next_token() else {
                cell.push_str(&self.text[self.pos..]);
                self.pos = self.text.len();
                return Ok((cell, Boundary::End));
            };

            cell.push_str(&self.text[self.pos..offset]);

            match token {
                Token::Delimiter => {
                    self.pos = offset + len;
                    return Ok((cell, Boundary::Cell));
                }
                Token::LineDelimiter => {
                    self.pos = offset + len;
                    return Ok((cell, Boundary::Line));
                }
                Token::Quote => {
                    let after = offset + len;
                    if offset != start && self.text[after..].starts_with(self.quote) {
                        // Doubled marker outside a quoted span is a literal quote
                        cell.push_str(self.quote);
                        self.pos = after + len;
                    } else {
                        self.read_quoted(&mut cell, offset)?;
                    }
                }
            }
        }
    }

    /// Consumes a quoted span opened at `open`, leaving the cursor just past
    /// its closing marker.
    fn read_quoted(&mut self, cell: &mut String, open: usize) -> TokenizeResult<()> {
        let len = self.quotes.len();
        self.pos = open + len;

        loop {
            let Some(offset) = self.quotes.find_from(self.text.as_bytes(), self.pos) else {
                return Err(TokenizeError::MalformedQuoting {
                    row: self.row,
                    offset: open,
                });
            };

            cell.push_str(&self.text[self.pos..offset]);
            let after = offset + len;

            if self.text[after..].starts_with(self.quote) {
                cell.push_str(self.quote);
                self.pos = after + len;
            } else {
                self.pos = after;
                return Ok(());
            }
        }
    }

    /// Nearest token at or after the cursor, with its offset and length.
    ///
    /// When two tokens match at the same offset the longer one wins, so a line
    /// delimiter of `\r\n` takes precedence over a cell delimiter of `\r`.
    fn next_token(&mut self) -> Option<(Token, usize, usize)> {
        let haystack = self.text.as_bytes();
        let pos = self.pos;

        let mut candidates = [
            self.quotes
                .find_from(haystack, pos)
                .map(|offset| (Token::Quote, offset, self.quotes.len())),
            self.delimiters
                .find_from(haystack, pos)
                .map(|offset| (Token::Delimiter, offset, self.delimiters.len())),
            None,
        ];
        if let Some(lines) = self.lines.as_mut() {
            candidates[2] = lines
                .find_from(haystack, pos)
                .map(|offset| (Token::LineDelimiter, offset, lines.len()));
        }

        candidates
            .into_iter()
            .flatten()
            .min_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
    }
}
