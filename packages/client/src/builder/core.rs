//! Core `RequestBuilder` structure

use std::any::Any;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use http::HeaderMap;
use serde::Serialize;

use super::headers::BasicAuth;
use crate::cache::{self, ResponseCache};
use crate::client::{HttpClient, HttpClientBuilder};
use crate::config::{CustomPool, TimeoutConfig};
use crate::error::Result;
use crate::http::ContentType;
use crate::proxy::ProxyMatcher;

/// Configuration read by every call of a builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct BuilderConfig {
    pub(crate) base_url: String,
    pub(crate) content_type: ContentType,
    pub(crate) headers: HeaderMap,
    pub(crate) basic_auth: Option<BasicAuth>,
    pub(crate) user_agent: Option<String>,
    pub(crate) disable_cache: bool,
    pub(crate) timeouts: TimeoutConfig,
    pub(crate) follow_redirect: bool,
    pub(crate) custom_pool: Option<Arc<CustomPool>>,
}

/// Configured entry point for requests.
///
/// Clones share configuration, transport and cache. Any setter returns a
/// builder with its own, not yet built, transport.
#[derive(Clone)]
#[must_use = "builders do nothing unless a request method is called"]
pub struct RequestBuilder {
    pub(crate) config: Arc<BuilderConfig>,
    pub(crate) transport: Arc<OnceLock<HttpClient>>,
    pub(crate) cache: Arc<ResponseCache>,
}

impl RequestBuilder {
    /// JSON builder using the process-wide cache
    pub fn new() -> Self {
        Self {
            config: Arc::new(BuilderConfig::default()),
            transport: Arc::new(OnceLock::new()),
            cache: cache::global_cache(),
        }
    }

    /// Shorthand for a JSON builder
    pub fn json() -> Self {
        Self::new().content_type(ContentType::Json)
    }

    /// Shorthand for an XML builder
    pub fn xml() -> Self {
        Self::new().content_type(ContentType::Xml)
    }

    /// Shorthand for a raw-bytes builder
    pub fn bytes() -> Self {
        Self::new().content_type(ContentType::Bytes)
    }

    /// The Cache Store this builder reads and populates
    pub fn cache_store(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub(crate) fn configure(mut self, apply: impl FnOnce(&mut BuilderConfig)) -> Self {
        apply(Arc::make_mut(&mut self.config));
        self.transport = Arc::new(OnceLock::new());
        self
    }

    /// Transport for the next dispatch.
    ///
    /// A custom pool's transport is shared with every builder holding the same
    /// pool; otherwise the transport is built once per builder.
    pub(crate) fn http_client(&self) -> HttpClient {
        let connect_timeout = self.config.timeouts.connect_timeout();

        match &self.config.custom_pool {
            Some(pool) => pool.transport(connect_timeout),
            None => self
                .transport
                .get_or_init(|| {
                    HttpClientBuilder::new()
                        .connect_timeout(connect_timeout)
                        .proxy(ProxyMatcher::from_system())
                        .build()
                })
                .clone(),
        }
    }

    pub(crate) fn marshal<B: Serialize + Any>(&self, body: &B) -> Result<Bytes> {
        self.config.content_type.marshal(body)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("config", &self.config)
            .field("transport_built", &self.transport.get().is_some())
            .finish()
    }
}
