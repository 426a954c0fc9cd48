//! Freshness evaluation
//!
//! Reads the caching metadata of a fresh origin response and decides whether,
//! and for how long, it may be stored.

use std::sync::LazyLock;
use std::time::{Duration, Instant, SystemTime};

use http::header::{CACHE_CONTROL, ETAG, EXPIRES, LAST_MODIFIED};
use http::{HeaderMap, Method};
use regex::Regex;

use super::http_date::httpdate;

static MAX_AGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:max-age|s-maxage)=(\d+)").ok());

/// Caching metadata extracted from a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Freshness {
    /// Absolute expiry, set only for a positive TTL.
    pub expires_at: Option<Instant>,
    pub last_modified: Option<SystemTime>,
    pub etag: Option<String>,
}

impl Freshness {
    pub fn evaluate(headers: &HeaderMap) -> Self {
        Self::evaluate_at(headers, Instant::now(), SystemTime::now())
    }

    pub(crate) fn evaluate_at(headers: &HeaderMap, now: Instant, wall_now: SystemTime) -> Self {
        let header = |name| headers.get(name).and_then(|v| v.to_str().ok());

        let expires_at = match header(CACHE_CONTROL).and_then(max_age) {
            // A max-age directive decides alone, even when it grants no TTL.
            // A TTL past what `Instant` can represent grants none.
            Some(seconds) => seconds
                .filter(|s| *s > 0)
                .and_then(|s| now.checked_add(Duration::from_secs(s))),
            None => header(EXPIRES)
                .and_then(|raw| httpdate::parse_http_date(raw).ok())
                .and_then(|expires| expires.duration_since(wall_now).ok())
                .filter(|ttl| !ttl.is_zero())
                .and_then(|ttl| now.checked_add(ttl)),
        };

        let last_modified = header(LAST_MODIFIED).and_then(|raw| httpdate::parse_http_date(raw).ok());
        let etag = header(ETAG).filter(|e| !e.is_empty()).map(str::to_owned);

        Self {
            expires_at,
            last_modified,
            etag,
        }
    }

    /// A positive TTL was established.
    pub fn has_ttl(&self) -> bool {
        self.expires_at.is_some()
    }

    /// No TTL but validators present: every reuse needs a conditional request.
    pub fn revalidate(&self) -> bool {
        !self.has_ttl() && (self.last_modified.is_some() || self.etag.is_some())
    }

    pub fn is_cacheable(&self) -> bool {
        self.has_ttl() || self.revalidate()
    }
}

/// `Some(Some(n))` for a parsed directive, `Some(None)` for a directive whose
/// value does not fit, `None` when no directive is present.
fn max_age(cache_control: &str) -> Option<Option<u64>> {
    let captures = MAX_AGE.as_ref()?.captures(cache_control)?;
    Some(captures.get(1).and_then(|m| m.as_str().parse().ok()))
}

/// Only read-class verbs are ever cached.
pub fn is_read_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::httpdate::fmt_http_date;
    use super::*;

    fn headers(pairs: &[(http::header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_str(value).expect("valid header"));
        }
        map
    }

    #[test]
    fn max_age_sets_ttl() {
        let now = Instant::now();
        let f = Freshness::evaluate_at(&headers(&[(CACHE_CONTROL, "public, max-age=2")]), now, SystemTime::now());

        assert_eq!(f.expires_at, Some(now + Duration::from_secs(2)));
        assert!(f.is_cacheable());
        assert!(!f.revalidate());
    }

    #[test]
    fn s_maxage_is_accepted() {
        let now = Instant::now();
        let f = Freshness::evaluate_at(&headers(&[(CACHE_CONTROL, "s-maxage=30")]), now, SystemTime::now());
        assert_eq!(f.expires_at, Some(now + Duration::from_secs(30)));
    }

    #[test]
    fn zero_max_age_does_not_fall_back_to_expires() {
        let wall = SystemTime::now();
        let later = fmt_http_date(wall + Duration::from_secs(3600));
        let f = Freshness::evaluate_at(
            &headers(&[(CACHE_CONTROL, "max-age=0"), (EXPIRES, later.as_str())]),
            Instant::now(),
            wall,
        );

        assert!(!f.has_ttl());
        assert!(!f.is_cacheable());
    }

    #[test]
    fn unrepresentable_max_age_grants_no_ttl() {
        let huge = u64::MAX.to_string();
        let directive = format!("max-age={huge}");
        let f = Freshness::evaluate(&headers(&[(CACHE_CONTROL, directive.as_str()), (ETAG, "1234")]));

        assert!(!f.has_ttl());
        assert!(f.revalidate());

        let overflowing = format!("max-age={huge}0");
        assert!(!Freshness::evaluate(&headers(&[(CACHE_CONTROL, overflowing.as_str())])).is_cacheable());
    }

    #[test]
    fn far_future_expires_does_not_overflow() {
        let f = Freshness::evaluate_at(
            &headers(&[(EXPIRES, "Fri, 31 Dec 9999 23:59:59 GMT")]),
            Instant::now(),
            SystemTime::now(),
        );
        // Either representable or dropped, never a panic.
        let _ = f.has_ttl();
    }

    #[test]
    fn future_expires_sets_ttl() {
        let wall = SystemTime::now();
        let later = fmt_http_date(wall + Duration::from_secs(120));
        let f = Freshness::evaluate_at(&headers(&[(EXPIRES, later.as_str())]), Instant::now(), wall);
        assert!(f.has_ttl());
    }

    #[test]
    fn past_or_malformed_expires_is_ignored() {
        let wall = SystemTime::now();
        let earlier = fmt_http_date(wall - Duration::from_secs(120));
        assert!(!Freshness::evaluate_at(&headers(&[(EXPIRES, earlier.as_str())]), Instant::now(), wall).has_ttl());
        assert!(!Freshness::evaluate_at(&headers(&[(EXPIRES, "0")]), Instant::now(), wall).has_ttl());
    }

    #[test]
    fn validators_without_ttl_require_revalidation() {
        let etag_only = Freshness::evaluate(&headers(&[(ETAG, "1234")]));
        assert!(etag_only.revalidate());
        assert_eq!(etag_only.etag.as_deref(), Some("1234"));

        let lm_only = Freshness::evaluate(&headers(&[(LAST_MODIFIED, "Mon, 02 Jan 2006 15:04:05 GMT")]));
        assert!(lm_only.revalidate());
        assert!(lm_only.is_cacheable());

        let with_ttl = Freshness::evaluate(&headers(&[(ETAG, "1234"), (CACHE_CONTROL, "max-age=10")]));
        assert!(!with_ttl.revalidate());
    }

    #[test]
    fn plain_response_is_not_cacheable() {
        assert!(!Freshness::evaluate(&HeaderMap::new()).is_cacheable());
        assert!(!Freshness::evaluate(&headers(&[(CACHE_CONTROL, "no-store")])).is_cacheable());
    }

    #[test]
    fn read_methods() {
        assert!(is_read_method(&Method::GET));
        assert!(is_read_method(&Method::HEAD));
        assert!(is_read_method(&Method::OPTIONS));
        assert!(!is_read_method(&Method::POST));
        assert!(!is_read_method(&Method::DELETE));
    }
}
