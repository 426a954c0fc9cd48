//! Shareable connection pool configuration

use std::sync::OnceLock;
use std::time::Duration;

use crate::client::{HttpClient, HttpClientBuilder};
use crate::proxy::{self, ProxyMatcher};

/// A connection pool that builders opt into sharing.
///
/// Every builder holding the same `Arc<CustomPool>` dispatches through one
/// transport, built by whichever builder sends first. A proxy set here is used
/// for every destination; an address that does not parse is ignored.
#[derive(Debug, Default)]
pub struct CustomPool {
    max_idle_conns_per_host: usize,
    proxy: Option<String>,
    transport: OnceLock<HttpClient>,
}

impl CustomPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle connections kept per host. Zero selects the default.
    #[must_use]
    pub fn with_max_idle_conns_per_host(mut self, max: usize) -> Self {
        self.max_idle_conns_per_host = max;
        self
    }

    /// Forward proxy, e.g. `http://proxy.local:3128`.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn max_idle_conns_per_host(&self) -> usize {
        self.max_idle_conns_per_host
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// The pool's transport, built on first use with `connect_timeout`.
    pub(crate) fn transport(&self, connect_timeout: Option<Duration>) -> HttpClient {
        self.transport
            .get_or_init(|| {
                let matcher = match self.proxy.as_deref().map(proxy::parse_proxy) {
                    Some(Ok(uri)) => ProxyMatcher::fixed(uri),
                    Some(Err(e)) => {
                        tracing::warn!(target: "restful::transport", error = %e, "ignoring custom pool proxy");
                        ProxyMatcher::none()
                    }
                    None => ProxyMatcher::none(),
                };

                HttpClientBuilder::new()
                    .connect_timeout(connect_timeout)
                    .pool_max_idle_per_host(self.max_idle_conns_per_host)
                    .proxy(matcher)
                    .build()
            })
            .clone()
    }
}
