//! Cache entry management with TTL and validation support

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime};

use bytes::Bytes;
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use http::{HeaderMap, HeaderValue, StatusCode, Version};

use super::freshness::Freshness;
use super::http_date::httpdate;

/// Cached response entry with metadata
///
/// Immutable once stored, apart from the hit counter. Revalidation replaces
/// the whole entry.
#[derive(Debug)]
pub struct CacheEntry {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Absolute expiry; `None` for entries kept until evicted
    pub expires_at: Option<Instant>,
    pub last_modified: Option<SystemTime>,
    pub etag: Option<String>,
    /// Must be conditionally re-checked before every reuse
    pub revalidate: bool,
    pub created_at: Instant,
    hit_count: AtomicU64,
}

impl CacheEntry {
    pub fn new(status: StatusCode, version: Version, headers: HeaderMap, body: Bytes, freshness: Freshness) -> Self {
        let revalidate = freshness.revalidate();

        Self {
            status,
            version,
            headers,
            body,
            expires_at: freshness.expires_at,
            last_modified: freshness.last_modified,
            etag: freshness.etag,
            revalidate,
            created_at: Instant::now(),
            hit_count: AtomicU64::new(0),
        }
    }

    /// Check if cache entry is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires| now >= expires)
    }

    /// Check if entry can be validated with conditional request
    pub fn can_validate(&self) -> bool {
        self.etag.is_some() || self.last_modified.is_some()
    }

    /// Conditional headers for a revalidation request.
    ///
    /// The entity tag wins over the last-modified date when both exist.
    pub fn validation_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(etag) = self.etag.as_deref() {
            if let Ok(value) = HeaderValue::from_str(etag) {
                headers.insert(IF_NONE_MATCH, value);
            }
        } else if let Some(last_modified) = self.last_modified
            && let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(last_modified))
        {
            headers.insert(IF_MODIFIED_SINCE, value);
        }

        headers
    }

    /// Record cache hit
    pub fn record_hit(&self) {
        self.hit_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get hit count
    pub fn hits(&self) -> u64 {
        self.hit_count.load(Ordering::Relaxed)
    }

    /// Calculate age of this cache entry
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use http::header::{ETAG, LAST_MODIFIED};

    use super::*;

    fn entry(headers: HeaderMap) -> CacheEntry {
        let freshness = Freshness::evaluate(&headers);
        CacheEntry::new(StatusCode::OK, Version::HTTP_11, headers, Bytes::from_static(b"[]"), freshness)
    }

    #[test]
    fn etag_takes_priority_over_last_modified() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("1234"));
        headers.insert(LAST_MODIFIED, HeaderValue::from_static("Mon, 02 Jan 2006 15:04:05 GMT"));

        let validation = entry(headers).validation_headers();
        assert_eq!(validation.get(IF_NONE_MATCH), Some(&HeaderValue::from_static("1234")));
        assert!(validation.get(IF_MODIFIED_SINCE).is_none());
    }

    #[test]
    fn last_modified_round_trips_into_if_modified_since() {
        let mut headers = HeaderMap::new();
        headers.insert(LAST_MODIFIED, HeaderValue::from_static("Mon, 02 Jan 2006 15:04:05 GMT"));

        let stored = entry(headers);
        assert!(stored.revalidate);
        assert_eq!(
            stored.validation_headers().get(IF_MODIFIED_SINCE),
            Some(&HeaderValue::from_static("Mon, 02 Jan 2006 15:04:05 GMT"))
        );
    }

    #[test]
    fn revalidate_entries_never_expire() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("1234"));

        let stored = entry(headers);
        assert!(!stored.is_expired_at(Instant::now() + Duration::from_secs(86_400 * 365)));
    }

    #[test]
    fn hits_are_counted() {
        let stored = entry(HeaderMap::new());
        stored.record_hit();
        stored.record_hit();
        assert_eq!(stored.hits(), 2);
    }
}
