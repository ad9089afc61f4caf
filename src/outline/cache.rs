//! Per-document symbol cache with LRU eviction
//!
//! Entries are keyed by document key and validated by revision. Recency is kept
//! by [`lru::LruCache`]: a revision-matching `get` promotes the entry to MRU,
//! while a revision mismatch only peeks and leaves the order alone.

use crate::extractors::SymbolRecord;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct CacheEntry {
    revision: u64,
    symbols: Arc<Vec<SymbolRecord>>,
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug)]
pub struct SymbolCache {
    entries: LruCache<String, CacheEntry>,
}

impl SymbolCache {
    /// Empty cache holding at most `capacity` entries (at least one).
    ///
    /// The capacity is otherwise taken as given; settings-driven callers clamp
    /// it first (see [`crate::config::clamp_cache_entries`]).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(non_zero(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols for `key` when the cached revision matches exactly; a hit becomes MRU
    pub fn get(&mut self, key: &str, revision: u64) -> Option<Arc<Vec<SymbolRecord>>> {
        match self.entries.peek(key) {
            Some(entry) if entry.revision == revision => {}
            Some(entry) => {
                trace!(
                    "Cache miss for {}: revision {} cached, {} requested",
                    key, entry.revision, revision
                );
                return None;
            }
            None => return None,
        }
        self.entries.get(key).map(|entry| Arc::clone(&entry.symbols))
    }

    /// Insert or overwrite and promote to MRU; a full cache drops its LRU entry
    pub fn put(&mut self, key: &str, revision: u64, symbols: Vec<SymbolRecord>) -> Arc<Vec<SymbolRecord>> {
        let symbols = Arc::new(symbols);
        let entry = CacheEntry {
            revision,
            symbols: Arc::clone(&symbols),
        };

        if let Some((evicted, _)) = self.entries.push(key.to_string(), entry) {
            if evicted != key {
                debug!("Evicted {} from symbol cache", evicted);
            }
        }
        symbols
    }

    fn evict_down_to(&mut self, limit: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() > limit {
            let Some((key, _)) = self.entries.pop_lru() else {
                break;
            };
            debug!("Evicted {} from symbol cache", key);
            evicted += 1;
        }
        evicted
    }

    /// Drop least recently used entries until the cache fits its capacity
    pub fn evict_excess(&mut self) -> usize {
        self.evict_down_to(self.capacity())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.pop(key).is_some()
    }

    /// Change the capacity and evict immediately; returns the number of evictions
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        let capacity = non_zero(capacity);
        // `resize` would drop entries silently, so shrink from the LRU end first
        let evicted = self.evict_down_to(capacity.get());
        self.entries.resize(capacity);
        evicted
    }

    pub fn revision_of(&self, key: &str) -> Option<u64> {
        self.entries.peek(key).map(|entry| entry.revision)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached keys from least to most recently used
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.entries.iter().rev().map(|(key, _)| key.clone()).collect()
    }
}
