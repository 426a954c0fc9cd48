//! Header decoration of outbound requests

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use super::core::BuilderConfig;
use crate::cache::CacheEntry;
use crate::config::DEFAULT_USER_AGENT;

/// Carries the true target URL to the mock server.
pub const X_ORIGINAL_URL: HeaderName = HeaderName::from_static("x-original-url");

/// Basic authentication credentials, stored pre-encoded.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    encoded: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            encoded: format!("Basic {}", STANDARD.encode(format!("{username}:{password}"))),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn header_value(&self) -> Option<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.encoded).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Verbs that carry a request body.
pub(crate) fn is_content_method(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Headers for one dispatch.
///
/// Custom headers come first; the fixed connection and cache directives, the
/// mock side channel, credentials, user agent, format negotiation and
/// conditional validators are then set over them.
pub(crate) fn decorate(
    config: &BuilderConfig,
    method: &Method,
    carried: Option<&CacheEntry>,
    original_url: Option<&Url>,
) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in &config.headers {
        headers.append(name.clone(), value.clone());
    }

    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    if let Some(url) = original_url
        && let Ok(value) = HeaderValue::from_str(url.as_str())
    {
        headers.insert(X_ORIGINAL_URL, value);
    }

    if let Some(value) = config.basic_auth.as_ref().and_then(BasicAuth::header_value) {
        headers.insert(AUTHORIZATION, value);
    }

    let user_agent = config
        .user_agent
        .as_deref()
        .and_then(|ua| HeaderValue::from_str(ua).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, user_agent);

    if let Some(mime) = config.content_type.mime() {
        headers.insert(ACCEPT, HeaderValue::from_static(mime));
        if is_content_method(method) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
        }
    }

    if let Some(entry) = carried {
        headers.extend(entry.validation_headers());
    }

    headers
}
