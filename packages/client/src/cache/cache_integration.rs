//! Process-wide cache instance
//!
//! Builders use this store unless one is injected with
//! `RequestBuilder::cache`.

use std::sync::{Arc, LazyLock};

use super::response_cache::ResponseCache;

/// Global cache instance shared by every builder with caching enabled
pub static GLOBAL_CACHE: LazyLock<Arc<ResponseCache>> = LazyLock::new(|| Arc::new(ResponseCache::default()));

/// Shared handle to the process-wide store
pub fn global_cache() -> Arc<ResponseCache> {
    Arc::clone(&GLOBAL_CACHE)
}

/// Set the capacity of the process-wide store
pub fn set_max_cache_size(max_entries: usize) {
    GLOBAL_CACHE.set_max_entries(max_entries);
}
