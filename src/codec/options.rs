//! Codec behaviour switches

use serde::{Deserialize, Serialize};

/// How the first row of a document is treated when reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// First row holds column names; fields are matched by name
    #[default]
    FirstRow,
    /// Every row is data; fields are matched by declared index
    None,
}

/// Read and write options for a `CsvCodec`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecOptions {
    pub header_mode: HeaderMode,
    /// Fail instead of skipping fields whose column is missing from the header
    pub strict: bool,
    /// Write a header row of resolved column names
    pub include_header: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            header_mode: HeaderMode::FirstRow,
            strict: false,
            include_header: true,
        }
    }
}

impl CodecOptions {
    /// Options for headerless documents: index-driven reads, no header written
    pub fn headerless() -> Self {
        Self {
            header_mode: HeaderMode::None,
            include_header: false,
            ..Self::default()
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn include_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn uses_header(&self) -> bool {
        self.header_mode == HeaderMode::FirstRow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodecOptions::default();
        assert!(options.uses_header());
        assert!(!options.strict);
        assert!(options.include_header);
    }

    #[test]
    fn test_headerless() {
        let options = CodecOptions::headerless().strict(true);
        assert!(!options.uses_header());
        assert!(!options.include_header);
        assert!(options.strict);
    }
}
