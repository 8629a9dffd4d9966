//! Opt-in cache of resolved schemas
//!
//! Resolution is cheap, but codecs that read many documents with the same
//! header can share one cache. Entries are keyed by the full resolution input
//! (descriptors, header row, strict flag) and are immutable once inserted.
//! The cache never evicts; once `max_entries` is reached new schemas are
//! resolved but not stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::tokenizer::Row;

use super::errors::SchemaResult;
use super::resolver::resolve;
use super::types::{ColumnSchema, FieldDescriptor};

/// Default bound on stored schemas
pub const DEFAULT_MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    descriptors: Vec<FieldDescriptor>,
    header: Option<Row>,
    strict: bool,
}

/// Thread-safe schema cache.
#[derive(Debug)]
pub struct SchemaCache {
    entries: RwLock<HashMap<CacheKey, Arc<ColumnSchema>>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCache {
    /// Create a cache bounded by [`DEFAULT_MAX_ENTRIES`]
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache storing at most `max_entries` schemas
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached schema for this input, resolving it on a miss.
    ///
    /// Resolution errors are returned and never cached.
    pub fn get_or_resolve(
        &self,
        descriptors: &[FieldDescriptor],
        header: Option<&Row>,
        strict: bool,
    ) -> SchemaResult<Arc<ColumnSchema>> {
        self.lookup(descriptors, header, strict).map(|(schema, _)| schema)
    }

    /// Like `get_or_resolve`, also reporting whether this call was a hit.
    ///
    /// The flag belongs to this call alone; concurrent lookups on the same
    /// cache do not affect it.
    pub fn lookup(
        &self,
        descriptors: &[FieldDescriptor],
        header: Option<&Row>,
        strict: bool,
    ) -> SchemaResult<(Arc<ColumnSchema>, bool)> {
        let key = CacheKey {
            descriptors: descriptors.to_vec(),
            header: header.cloned(),
            strict,
        };

        if let Some(schema) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok((Arc::clone(schema), true));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let schema = Arc::new(resolve(descriptors, header, strict)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() < self.max_entries {
            entries.entry(key).or_insert_with(|| Arc::clone(&schema));
        }
        Ok((schema, false))
    }

    /// Number of stored schemas
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to resolve
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drop every stored schema
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;

    fn fields() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::text("a"), FieldDescriptor::int("b")]
    }

    #[test]
    fn test_second_lookup_hits() {
        let cache = SchemaCache::new();
        let header: Row = ["a", "b"].into_iter().collect();

        let first = cache.get_or_resolve(&fields(), Some(&header), true).unwrap();
        let second = cache.get_or_resolve(&fields(), Some(&header), true).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lookup_reports_hit() {
        let cache = SchemaCache::new();
        let header: Row = ["a", "b"].into_iter().collect();

        let (first, hit) = cache.lookup(&fields(), Some(&header), false).unwrap();
        assert!(!hit);
        let (second, hit) = cache.lookup(&fields(), Some(&header), false).unwrap();
        assert!(hit);
        assert!(Arc::ptr_eq(&first, &second));

        let (_, hit) = cache.lookup(&fields(), Some(&header), true).unwrap();
        assert!(!hit);
    }

    #[test]
    fn test_different_header_is_different_entry() {
        let cache = SchemaCache::new();
        let ab: Row = ["a", "b"].into_iter().collect();
        let ba: Row = ["b", "a"].into_iter().collect();

        let first = cache.get_or_resolve(&fields(), Some(&ab), true).unwrap();
        let second = cache.get_or_resolve(&fields(), Some(&ba), true).unwrap();

        assert_ne!(first.column_for("a"), second.column_for("a"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = SchemaCache::new();
        let header: Row = ["a"].into_iter().collect();
        assert!(cache.get_or_resolve(&fields(), Some(&header), true).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_bounded() {
        let cache = SchemaCache::with_max_entries(1);
        let ab: Row = ["a", "b"].into_iter().collect();
        let ba: Row = ["b", "a"].into_iter().collect();
        cache.get_or_resolve(&fields(), Some(&ab), false).unwrap();
        cache.get_or_resolve(&fields(), Some(&ba), false).unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(SchemaCache::new());
        let header: Row = ["a", "b"].into_iter().collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let header = header.clone();
                std::thread::spawn(move || {
                    cache.get_or_resolve(&fields(), Some(&header), true).unwrap()
                })
            })
            .collect();

        for handle in handles {
            let schema = handle.join().unwrap();
            assert_eq!(schema.len(), 2);
        }
        assert_eq!(cache.len(), 1);
    }
}
