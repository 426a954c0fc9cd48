//! Canned responses for offline testing
//!
//! While the mock server runs, every request any builder dispatches goes to
//! it instead of the real host. The true target travels in the
//! `X-Original-URL` header and picks the stub to answer with. Requests with no
//! matching stub get `400 Bad Request` and the body [`MOCK_NOT_FOUND`].
//!
//! ```no_run
//! use restful_client::mockup::{self, Mock};
//!
//! mockup::start_mockup_server()?;
//! mockup::add_mockups(&[Mock {
//!     url: "http://api.local/user?id=1".into(),
//!     resp_http_code: 200,
//!     resp_body: r#"{"id":1,"name":"Hernan"}"#.into(),
//!     ..Mock::default()
//! }])?;
//! # Ok::<(), restful_client::Error>(())
//! ```

mod server;

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use http::{HeaderMap, Method};
use url::Url;

use crate::cache::CacheKey;
use crate::config::ConfigurationError;
use crate::error::{self, Result};

pub use server::{is_mockup_active, start_mockup_server, stop_mockup_server};

/// Body returned when no stub matches.
pub const MOCK_NOT_FOUND: &str = "MockUp nil!";

static MOCKS: LazyLock<DashMap<String, Arc<Mock>>> = LazyLock::new(DashMap::new);

/// A stubbed exchange.
///
/// Only `url`, `http_method` and the `resp_*` fields take part in matching
/// and answering. The request fields document the expected call.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    pub url: String,
    pub http_method: Method,
    pub req_headers: HeaderMap,
    pub req_body: String,
    pub resp_http_code: u16,
    pub resp_headers: HeaderMap,
    pub resp_body: String,
}

fn registry_key(method: &Method, url: &str) -> std::result::Result<String, url::ParseError> {
    Ok(format!("{method} {}", CacheKey::parse(url)?))
}

/// Register stubs, replacing any with the same method and URL.
///
/// Fails on the first stub whose URL does not parse; stubs before it stay
/// registered.
pub fn add_mockups(mocks: &[Mock]) -> Result<()> {
    for mock in mocks {
        let key = registry_key(&mock.http_method, &mock.url).map_err(|e| {
            error::configuration(ConfigurationError::InvalidUrl {
                url: mock.url.clone(),
                reason: e.to_string(),
            })
        })?;

        tracing::debug!(target: "restful::mockup", %key, "registered mock");
        MOCKS.insert(key, Arc::new(mock.clone()));
    }
    Ok(())
}

/// Drop every registered stub.
pub fn flush_mockups() {
    MOCKS.clear();
}

pub(crate) fn lookup(method: &Method, original_url: &str) -> Option<Arc<Mock>> {
    let key = registry_key(method, original_url).ok()?;
    MOCKS.get(&key).map(|m| Arc::clone(m.value()))
}

/// Where to send a request for `target`, when the mock server is running.
pub(crate) fn route(target: &Url) -> Option<Url> {
    let mut routed = server::base_url()?;
    routed.set_path(target.path());
    routed.set_query(target.query());
    Some(routed)
}
