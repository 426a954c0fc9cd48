//! HTTP response caching
//!
//! A bounded, concurrent store keyed by normalized request identity, with
//! TTL and validator metadata extracted from origin responses:
//! - `max-age` / `s-maxage`, else a future `Expires`, grant a TTL
//! - `ETag` / `Last-Modified` without a TTL mark the entry for revalidation
//! - expiry is checked lazily on read, capacity eagerly on write

pub mod cache_config;
pub mod cache_entry;
pub mod cache_integration;
pub mod cache_key;
pub mod cache_stats;
pub mod freshness;
pub mod http_date;
pub mod response_cache;

pub use cache_config::CacheConfig;
pub use cache_entry::CacheEntry;
pub use cache_integration::{GLOBAL_CACHE, global_cache, set_max_cache_size};
pub use cache_key::CacheKey;
pub use cache_stats::CacheStats;
pub use freshness::{Freshness, is_read_method};
pub use http_date::{HttpDateParseError, httpdate};
pub use response_cache::ResponseCache;
