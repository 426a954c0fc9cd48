//! HTTP client configuration and construction

use std::time::Duration;

use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioTimer};

use super::HttpClient;
use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_IDLE_CONNS_PER_HOST, DEFAULT_POOL_IDLE_TIMEOUT};
use crate::connect::PoolConnector;
use crate::proxy::ProxyMatcher;

/// HTTP client builder for configuration
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    connect_timeout: Option<Duration>,
    pool_max_idle_per_host: usize,
    pool_idle_timeout: Duration,
    proxy: ProxyMatcher,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_MAX_IDLE_CONNS_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            proxy: ProxyMatcher::none(),
        }
    }

    /// Dial timeout, `None` waits for the OS.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Idle connections kept per host. Zero selects the default.
    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = if max == 0 {
            DEFAULT_MAX_IDLE_CONNS_PER_HOST
        } else {
            max
        };
        self
    }

    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: ProxyMatcher) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn build(self) -> HttpClient {
        tracing::debug!(
            target: "restful::transport",
            connect_timeout = ?self.connect_timeout,
            max_idle_per_host = self.pool_max_idle_per_host,
            "building connection pool"
        );

        let connector = PoolConnector::new(self.connect_timeout, self.proxy);
        let pool = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build(connector);

        HttpClient::from_pool(pool)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
