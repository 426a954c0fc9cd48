//! Fluent configuration of a `RequestBuilder`

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};

use super::core::RequestBuilder;
use super::headers::BasicAuth;
use crate::cache::ResponseCache;
use crate::config::CustomPool;
use crate::http::ContentType;

impl RequestBuilder {
    /// Prefix concatenated in front of every call URL
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.configure(|c| c.base_url = base_url)
    }

    pub fn content_type(self, content_type: ContentType) -> Self {
        self.configure(|c| c.content_type = content_type)
    }

    /// Add a header sent with every request.
    ///
    /// Invalid names or values are skipped with a warning.
    pub fn header(self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => self.configure(|c| {
                c.headers.append(name, value);
            }),
            _ => {
                tracing::warn!(target: "restful::builder", header = name, "skipping invalid header");
                self
            }
        }
    }

    /// Add every header of `headers`
    pub fn headers(self, headers: HeaderMap) -> Self {
        self.configure(|c| {
            for (name, value) in &headers {
                c.headers.append(name.clone(), value.clone());
            }
        })
    }

    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let auth = BasicAuth::new(username, password);
        self.configure(|c| c.basic_auth = Some(auth))
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.configure(|c| c.user_agent = Some(user_agent))
    }

    /// Skip the cache on reads and never populate it
    pub fn disable_cache(self, disable: bool) -> Self {
        self.configure(|c| c.disable_cache = disable)
    }

    /// Response-header timeout; zero restores the default
    pub fn timeout(self, timeout: Duration) -> Self {
        self.configure(|c| c.timeouts = c.timeouts.with_timeout(timeout))
    }

    /// Dial timeout; zero restores the default
    pub fn connect_timeout(self, timeout: Duration) -> Self {
        self.configure(|c| c.timeouts = c.timeouts.with_connect_timeout(timeout))
    }

    /// Remove both timeouts
    pub fn disable_timeout(self, disable: bool) -> Self {
        self.configure(|c| c.timeouts = c.timeouts.disabled(disable))
    }

    /// Follow redirects instead of failing with `Kind::RedirectBlocked`
    pub fn follow_redirect(self, follow: bool) -> Self {
        self.configure(|c| c.follow_redirect = follow)
    }

    /// Dispatch through a pool shared with other builders
    pub fn custom_pool(self, pool: Arc<CustomPool>) -> Self {
        self.configure(|c| c.custom_pool = Some(pool))
    }

    /// Use `cache` instead of the process-wide store
    pub fn cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = cache;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn setters_reset_the_lazy_transport() {
        let builder = RequestBuilder::new();
        let clone = builder.clone();
        assert!(Arc::ptr_eq(&builder.transport, &clone.transport));

        let changed = clone.timeout(Duration::from_millis(50));
        assert!(!Arc::ptr_eq(&builder.transport, &changed.transport));
        assert_eq!(changed.config.timeouts.response_timeout(), Some(Duration::from_millis(50)));
        assert_eq!(builder.config.timeouts.response_timeout(), Some(crate::config::DEFAULT_TIMEOUT));
    }

    #[test]
    fn invalid_headers_are_skipped() {
        let builder = RequestBuilder::new()
            .header("X-Test", "1")
            .header("bad header", "x")
            .header("X-Test", "2");

        let values: Vec<_> = builder.config.headers.get_all("x-test").iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(builder.config.headers.len(), 2);
    }

    #[test]
    fn injected_cache_is_used() {
        let cache = Arc::new(ResponseCache::default());
        let builder = RequestBuilder::new().cache(Arc::clone(&cache));
        assert!(Arc::ptr_eq(builder.cache_store(), &cache));
    }
}
