//! DocumentOutline - the request path from host documents to symbol lists
//!
//! Owns the extractor registry, the symbol cache and the refresh scheduler.
//! A cache miss extracts synchronously between `get` and `put`, so two
//! requests for one key can never observe a half-updated entry. Concurrent
//! misses are not deduplicated: every method takes `&mut self`.

use crate::config::OutlineConfig;
use crate::extractors::{ExtractorRegistry, SymbolRecord};
use crate::outline::cache::SymbolCache;
use crate::outline::document::SourceDocument;
use crate::outline::filter::filter_by_name;
use crate::watcher::{RefreshScheduler, RefreshSignal};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct DocumentOutline {
    config: OutlineConfig,
    registry: ExtractorRegistry,
    cache: SymbolCache,
    scheduler: RefreshScheduler,
}

impl DocumentOutline {
    /// Service with the default extractors; refresh signals arrive on the receiver
    pub fn new(config: OutlineConfig) -> (Self, mpsc::UnboundedReceiver<RefreshSignal>) {
        let config = config.clamped();
        let registry = ExtractorRegistry::with_defaults(config.python_max_depth);
        Self::with_registry(config, registry)
    }

    pub fn with_registry(
        config: OutlineConfig,
        registry: ExtractorRegistry,
    ) -> (Self, mpsc::UnboundedReceiver<RefreshSignal>) {
        let config = config.clamped();
        let cache = SymbolCache::new(config.max_cache_entries);
        let (scheduler, receiver) = RefreshScheduler::new(config.debounce());

        let outline = Self {
            config,
            registry,
            cache,
            scheduler,
        };
        (outline, receiver)
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Filtered symbols for a document, extracting on a cache miss
    pub fn symbols_for(&mut self, document: &impl SourceDocument) -> Vec<SymbolRecord> {
        if !self.config.enabled {
            return Vec::new();
        }

        let key = document.unique_key();
        let revision = document.revision();

        let symbols = match self.cache.get(key, revision) {
            Some(symbols) => {
                debug!("Symbol cache hit for {}", key);
                symbols
            }
            None => {
                let Some(extractor) = self.registry.resolve(document.language_id()) else {
                    debug!("No extractor for language {}", document.language_id());
                    return Vec::new();
                };
                debug!("Symbol cache miss for {}, extracting", key);
                let extracted = extractor.extract(document.full_text());
                self.cache.put(key, revision, extracted)
            }
        };

        filter_by_name(&symbols, &self.config.filter_regex)
    }

    /// Content change notification: repaint now when the cached revision is current, else debounce.
    ///
    /// Debouncing needs a tokio runtime; synchronous hosts get an immediate `Reparse`.
    pub fn on_document_changed(&mut self, document: &impl SourceDocument) {
        if !self.config.enabled {
            return;
        }

        let key = document.unique_key();
        if self.cache.revision_of(key) == Some(document.revision()) {
            self.scheduler.notify_unchanged(key);
        } else {
            self.scheduler.schedule(key);
        }
    }

    /// Cancel any pending refresh and drop the cached entry
    pub fn on_document_closed(&mut self, key: &str) {
        self.invalidate(key);
    }

    pub fn invalidate(&mut self, key: &str) {
        self.scheduler.cancel(key);
        if self.cache.remove(key) {
            debug!("Invalidated cached symbols for {}", key);
        }
    }

    /// Apply new settings: re-clamp, resize the cache, update the debounce delay and Python depth
    pub fn apply_config(&mut self, config: OutlineConfig) {
        let config = config.clamped();

        let evicted = self.cache.set_capacity(config.max_cache_entries);
        if evicted > 0 {
            info!("Evicted {} cached outlines after settings change", evicted);
        }
        self.scheduler.set_delay(config.debounce());

        if config.python_max_depth != self.config.python_max_depth {
            self.registry.set_python_max_depth(config.python_max_depth);
            // Cached Python results were produced under the old depth
            self.cache.clear();
        }

        self.config = config;
    }

    pub fn is_refresh_pending(&self, key: &str) -> bool {
        self.scheduler.is_pending(key)
    }

    /// Cached keys from least to most recently used
    pub fn cached_keys(&self) -> Vec<String> {
        self.cache.keys_by_recency()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
