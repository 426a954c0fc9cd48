//! Restful public API
//!
//! REST client with a shared response cache, fork-join batches and
//! callback-driven async calls. Package-level verbs use a default JSON
//! builder; configure your own with [`json`], [`xml`] or [`bytes`].
//!
//! ```no_run
//! let resp = restful::get("http://localhost:8080/user/1");
//! println!("{} {}", resp.status(), resp.text());
//!
//! let users = restful::json().base_url("http://localhost:8080");
//! let mut batch = Vec::new();
//! users.fork_join(|c| {
//!     batch.push(c.get("/user/1"));
//!     batch.push(c.post("/user", &serde_json::json!({ "name": "Hernan" })));
//! });
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod defaults;

pub use defaults::*;

pub use restful_client::{
    BasicAuth, CacheKey, Concurrent, ContentType, CustomPool, Error, FutureResponse, Kind, RequestBuilder, Response,
    ResponseCache, Result, TimeoutConfig, Url,
};
pub use restful_client::{global_cache, mockup};

/// Static builder shorthands
pub struct Restful;

impl Restful {
    /// Shorthand for `RequestBuilder::json()`
    pub fn json() -> RequestBuilder {
        RequestBuilder::json()
    }

    /// Shorthand for `RequestBuilder::xml()`
    pub fn xml() -> RequestBuilder {
        RequestBuilder::xml()
    }

    /// Shorthand for `RequestBuilder::bytes()`
    pub fn bytes() -> RequestBuilder {
        RequestBuilder::bytes()
    }
}

/// A JSON builder with default settings
pub fn json() -> RequestBuilder {
    RequestBuilder::json()
}

/// An XML builder with default settings
pub fn xml() -> RequestBuilder {
    RequestBuilder::xml()
}

/// A raw-bytes builder with default settings
pub fn bytes() -> RequestBuilder {
    RequestBuilder::bytes()
}

/// Bound the shared response cache to `max_entries`.
///
/// Shrinking evicts entries until the cache fits.
pub fn set_max_cache_size(max_entries: usize) {
    log::debug!("restful: shared cache bounded to {max_entries} entries");
    restful_client::set_max_cache_size(max_entries);
}
