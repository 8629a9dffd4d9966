//! Observable codec events

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Reading
    /// Document split into rows
    DocumentTokenized,
    /// Column schema resolved for a document
    SchemaResolved,
    /// Column schema served from the cache
    SchemaCacheHit,
    /// Field had no matching column and was skipped (lenient mode)
    ColumnSkipped,
    /// Records built from a document
    RecordsRead,
    /// Cell text could not be converted
    ConversionFailed,

    // Writing
    /// Records written to text
    RecordsWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DocumentTokenized => "DOCUMENT_TOKENIZED",
            Event::SchemaResolved => "SCHEMA_RESOLVED",
            Event::SchemaCacheHit => "SCHEMA_CACHE_HIT",
            Event::ColumnSkipped => "COLUMN_SKIPPED",
            Event::RecordsRead => "RECORDS_READ",
            Event::ConversionFailed => "CONVERSION_FAILED",
            Event::RecordsWritten => "RECORDS_WRITTEN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DocumentTokenized | Event::SchemaResolved | Event::SchemaCacheHit => {
                Severity::Trace
            }
            Event::ConfigLoaded | Event::RecordsRead | Event::RecordsWritten => Severity::Info,
            Event::ColumnSkipped => Severity::Warn,
            Event::ConversionFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_unique() {
        let events = [
            Event::ConfigLoaded,
            Event::DocumentTokenized,
            Event::SchemaResolved,
            Event::SchemaCacheHit,
            Event::ColumnSkipped,
            Event::RecordsRead,
            Event::ConversionFailed,
            Event::RecordsWritten,
        ];
        let mut names: Vec<_> = events.iter().map(Event::as_str).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }

    #[test]
    fn test_failures_logged_as_errors() {
        assert_eq!(Event::ConversionFailed.severity(), Severity::Error);
        assert_eq!(Event::DocumentTokenized.severity(), Severity::Trace);
    }
}
