//! Codec counters
//!
//! - Counters only, monotonic
//! - Thread-safe, relaxed atomics
//! - Shared between codecs through `Arc`

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one or more codecs
#[derive(Debug, Default)]
pub struct CodecMetrics {
    rows_tokenized: AtomicU64,
    records_read: AtomicU64,
    records_written: AtomicU64,
    columns_skipped: AtomicU64,
    conversion_failures: AtomicU64,
    schema_cache_hits: AtomicU64,
    schema_resolutions: AtomicU64,
}

impl CodecMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rows_tokenized(&self, rows: u64) {
        self.rows_tokenized.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_records_read(&self, records: u64) {
        self.records_read.fetch_add(records, Ordering::Relaxed);
    }

    pub fn add_records_written(&self, records: u64) {
        self.records_written.fetch_add(records, Ordering::Relaxed);
    }

    pub fn add_columns_skipped(&self, columns: u64) {
        self.columns_skipped.fetch_add(columns, Ordering::Relaxed);
    }

    pub fn increment_conversion_failures(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_schema_cache_hits(&self) {
        self.schema_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_schema_resolutions(&self) {
        self.schema_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_tokenized: self.rows_tokenized.load(Ordering::Relaxed),
            records_read: self.records_read.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            columns_skipped: self.columns_skipped.load(Ordering::Relaxed),
            conversion_failures: self.conversion_failures.load(Ordering::Relaxed),
            schema_cache_hits: self.schema_cache_hits.load(Ordering::Relaxed),
            schema_resolutions: self.schema_resolutions.load(Ordering::Relaxed),
        }
    }

    /// Snapshot as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_tokenized: u64,
    pub records_read: u64,
    pub records_written: u64,
    pub columns_skipped: u64,
    pub conversion_failures: u64,
    pub schema_cache_hits: u64,
    pub schema_resolutions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        assert_eq!(CodecMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = CodecMetrics::new();
        metrics.add_rows_tokenized(3);
        metrics.add_rows_tokenized(2);
        metrics.add_records_read(4);
        metrics.increment_conversion_failures();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.rows_tokenized, 5);
        assert_eq!(snapshot.records_read, 4);
        assert_eq!(snapshot.conversion_failures, 1);
        assert_eq!(snapshot.records_written, 0);
    }

    #[test]
    fn test_to_json() {
        let metrics = CodecMetrics::new();
        metrics.add_records_written(7);
        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["records_written"], 7);
        assert_eq!(parsed["rows_tokenized"], 0);
    }
}
