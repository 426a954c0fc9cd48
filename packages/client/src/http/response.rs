//! Settled result of one request
//!
//! A `Response` is produced for every call, successful or not. Failures carry
//! an [`Error`] and no status; cache hits carry the stored entry's content.

use std::borrow::Cow;
use std::fmt::Write as _;

use bytes::Bytes;
use http::{HeaderMap, StatusCode, Version};
use serde::de::DeserializeOwned;

use super::format::ContentType;
use crate::cache::CacheEntry;
use crate::client::Inbound;
use crate::error::{Error, Result};

/// Result value of a request
#[derive(Debug, Clone)]
pub struct Response {
    status: Option<StatusCode>,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
    error: Option<Error>,
    cache_hit: bool,
    format: ContentType,
}

impl Response {
    pub(crate) fn from_inbound(inbound: Inbound, format: ContentType) -> Self {
        Self {
            status: Some(inbound.status),
            version: inbound.version,
            headers: inbound.headers,
            body: inbound.body,
            error: None,
            cache_hit: false,
            format,
        }
    }

    pub(crate) fn from_cache(entry: &CacheEntry, format: ContentType) -> Self {
        entry.record_hit();

        Self {
            status: Some(entry.status),
            version: entry.version,
            headers: entry.headers.clone(),
            body: entry.body.clone(),
            error: None,
            cache_hit: true,
            format,
        }
    }

    pub(crate) fn from_error(error: Error, format: ContentType) -> Self {
        Self {
            status: None,
            version: Version::default(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            error: Some(error),
            cache_hit: false,
            format,
        }
    }

    /// Numeric status, `0` when the request failed
    pub fn status(&self) -> u16 {
        self.status.map_or(0, |s| s.as_u16())
    }

    /// Status code, `None` when the request failed
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body with the builder's format.
    ///
    /// A failed request hands back its own error.
    pub fn fill_up<T: DeserializeOwned>(&self) -> Result<T> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.format.unmarshal(&self.body)
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// True when a status was received and no error occurred
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.status.is_some()
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| s.is_success())
    }

    /// Served from the cache without a network round trip, or confirmed by a
    /// `304 Not Modified`
    pub fn is_cache_hit(&self) -> bool {
        self.cache_hit
    }

    pub fn format(&self) -> ContentType {
        self.format
    }

    /// Convert a failed response into its error.
    pub fn into_result(self) -> Result<Self> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    /// Wire-like dump of status line, headers and body.
    pub fn debug(&self) -> String {
        let mut dump = String::new();

        match (&self.error, self.status) {
            (Some(error), _) => {
                let _ = write!(dump, "error: {error}");
                return dump;
            }
            (None, Some(status)) => {
                let _ = write!(dump, "{:?} {status}\r\n", self.version);
            }
            (None, None) => {}
        }

        for (name, value) in &self.headers {
            let _ = write!(dump, "{name}: {}\r\n", String::from_utf8_lossy(value.as_bytes()));
        }
        dump.push_str("\r\n");
        dump.push_str(&self.text());
        dump
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use http::header::CONTENT_TYPE;

    use super::*;
    use crate::error;

    fn ok_response(body: &'static str) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Response::from_inbound(
            Inbound {
                status: StatusCode::OK,
                version: Version::HTTP_11,
                headers,
                body: Bytes::from_static(body.as_bytes()),
            },
            ContentType::Json,
        )
    }

    #[test]
    fn bytes_and_text_agree() {
        let resp = ok_response(r#"[{"id":1}]"#);
        assert_eq!(resp.text(), String::from_utf8_lossy(resp.bytes()));
        assert_eq!(resp.status(), 200);
        assert!(resp.is_ok());
    }

    #[test]
    fn debug_contains_status_headers_and_body() {
        let resp = ok_response(r#"{"name":"Hernan"}"#);
        let dump = resp.debug();

        assert!(dump.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(dump.contains("content-type: application/json"));
        assert!(dump.contains(&*resp.text()));
    }

    #[test]
    fn failed_response_has_zero_status() {
        let resp = Response::from_error(error::transport("connection reset"), ContentType::Json);

        assert_eq!(resp.status(), 0);
        assert!(resp.status_code().is_none());
        assert!(!resp.is_ok());
        assert!(resp.fill_up::<serde_json::Value>().is_err());
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn fill_up_uses_builder_format() {
        let resp = ok_response(r#"{"id":7}"#);
        let value: serde_json::Value = resp.fill_up().expect("json body");
        assert_eq!(value["id"], 7);
    }
}
