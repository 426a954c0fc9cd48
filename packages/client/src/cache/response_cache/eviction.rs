//! Capacity reservation and eviction
//!
//! The victim is chosen pseudo-randomly: callers may not rely on recency.
//! It is drawn from a short window at the front of the map's iteration
//! order, which follows key hashes, so eviction cost does not grow with the
//! store.

use std::sync::atomic::Ordering;

use super::core::ResponseCache;

const EVICTION_WINDOW: usize = 32;

impl ResponseCache {
    /// Reserve room for one more entry, evicting as needed.
    ///
    /// Returns false only when the capacity is zero.
    pub(super) fn reserve_slot(&self) -> bool {
        loop {
            let max = self.max_entries.load(Ordering::Acquire);
            if max == 0 {
                return false;
            }

            let current = self.len.load(Ordering::Acquire);
            if current < max {
                if self
                    .len
                    .compare_exchange_weak(current, current + 1, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    return true;
                }
                continue;
            }

            // Every slot may be reserved by inserts that have not landed yet.
            if !self.evict_one() {
                std::thread::yield_now();
            }
        }
    }

    pub(super) fn release_slot(&self) {
        self.len.fetch_sub(1, Ordering::AcqRel);
    }

    /// Remove one arbitrary entry. Must not be called with a shard lock held.
    pub(super) fn evict_one(&self) -> bool {
        let window = self.len.load(Ordering::Acquire).min(EVICTION_WINDOW);
        if window == 0 {
            return false;
        }

        // Reserved slots may not have landed yet, so fall back to the last
        // entry seen when the map holds fewer than `skip + 1`.
        let skip = fastrand::usize(..window);
        let victim = self.entries.iter().take(skip + 1).last().map(|e| e.key().clone());

        let Some(victim) = victim else {
            return false;
        };

        if self.entries.remove(&victim).is_some() {
            self.release_slot();
            self.stats.record_eviction();
            tracing::debug!(target: "restful::cache", key = %victim, "evicted entry");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use bytes::Bytes;
    use http::header::CACHE_CONTROL;
    use http::{HeaderMap, HeaderValue, StatusCode, Version};

    use super::*;
    use crate::cache::{CacheConfig, CacheEntry, CacheKey, Freshness};

    fn fresh(path: &str) -> (CacheKey, CacheEntry) {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        let freshness = Freshness::evaluate(&headers);
        let key = CacheKey::parse(&format!("http://api.local{path}")).expect("valid url");
        (key, CacheEntry::new(StatusCode::OK, Version::HTTP_11, headers, Bytes::new(), freshness))
    }

    #[test]
    fn large_full_store_evicts_one_per_insert() {
        let cache = ResponseCache::new(CacheConfig::with_max_entries(20_000));

        for i in 0..25_000 {
            let (key, entry) = fresh(&format!("/user/{i}"));
            assert!(cache.set_nx(key, entry));
        }

        assert_eq!(cache.len(), 20_000);
        assert_eq!(cache.stats().evictions.load(Ordering::Relaxed), 5_000);
    }

    #[test]
    fn empty_store_has_no_victim() {
        let cache = ResponseCache::default();
        assert!(!cache.evict_one());
    }

    #[test]
    fn eviction_releases_the_slot() {
        let cache = ResponseCache::default();
        let (key, entry) = fresh("/only");
        cache.set_nx(key.clone(), entry);

        assert!(cache.evict_one());
        assert!(cache.is_empty());
        assert_eq!(cache.len.load(Ordering::Acquire), 0);
        assert!(cache.get(&key).is_none());
    }
}
