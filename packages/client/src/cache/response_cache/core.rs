//! Core ResponseCache structure and initialization

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::super::{cache_config::CacheConfig, cache_entry::CacheEntry, cache_key::CacheKey, cache_stats::CacheStats};

/// Bounded, concurrent HTTP response cache
pub struct ResponseCache {
    pub(super) entries: DashMap<CacheKey, Arc<CacheEntry>>,
    /// Stored entries plus slots reserved by in-flight inserts
    pub(super) len: AtomicUsize,
    pub(super) max_entries: AtomicUsize,
    pub(super) stats: CacheStats,
}

impl ResponseCache {
    /// Create new response cache with configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            len: AtomicUsize::new(0),
            max_entries: AtomicUsize::new(config.max_entries),
            stats: CacheStats::default(),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of stored entries, expired ones not yet collected included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.load(Ordering::Acquire)
    }

    /// Change the capacity. Shrinking evicts until the store fits.
    pub fn set_max_entries(&self, max_entries: usize) {
        self.max_entries.store(max_entries, Ordering::Release);

        while self.len.load(Ordering::Acquire) > max_entries {
            if !self.evict_one() {
                break;
            }
        }

        tracing::debug!(target: "restful::cache", max_entries, "cache capacity changed");
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        let keys: Vec<CacheKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            self.remove(&key);
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("len", &self.len())
            .field("max_entries", &self.max_entries())
            .field("stats", &self.stats)
            .finish()
    }
}
