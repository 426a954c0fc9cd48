//! Cache configuration

use crate::config::DEFAULT_MAX_CACHE_ENTRIES;

/// Cache configuration and limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in cache
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Configuration holding at most `max_entries` entries
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self { max_entries }
    }
}
