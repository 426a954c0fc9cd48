//! Package-level verbs on a shared default builder
//!
//! The default builder speaks JSON, has no base URL, and uses the shared
//! response cache.

use std::any::Any;
use std::sync::LazyLock;

use restful_client::{Concurrent, RequestBuilder, Response};
use serde::Serialize;

static DEFAULT_BUILDER: LazyLock<RequestBuilder> = LazyLock::new(RequestBuilder::json);

/// The builder behind the package-level verbs
pub fn default_builder() -> &'static RequestBuilder {
    &DEFAULT_BUILDER
}

/// GET `url`, served from the shared cache when fresh
pub fn get(url: &str) -> Response {
    log::debug!("restful: GET {url}");
    DEFAULT_BUILDER.get(url)
}

pub fn head(url: &str) -> Response {
    log::debug!("restful: HEAD {url}");
    DEFAULT_BUILDER.head(url)
}

pub fn options(url: &str) -> Response {
    log::debug!("restful: OPTIONS {url}");
    DEFAULT_BUILDER.options(url)
}

pub fn delete(url: &str) -> Response {
    log::debug!("restful: DELETE {url}");
    DEFAULT_BUILDER.delete(url)
}

/// POST `body` as JSON to `url`
pub fn post<B: Serialize + Any>(url: &str, body: &B) -> Response {
    log::debug!("restful: POST {url}");
    DEFAULT_BUILDER.post(url, body)
}

pub fn put<B: Serialize + Any>(url: &str, body: &B) -> Response {
    log::debug!("restful: PUT {url}");
    DEFAULT_BUILDER.put(url, body)
}

pub fn patch<B: Serialize + Any>(url: &str, body: &B) -> Response {
    log::debug!("restful: PATCH {url}");
    DEFAULT_BUILDER.patch(url, body)
}

/// GET `url` in the background and hand the response to `f`
pub fn async_get<F>(url: &str, f: F)
where
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_get(url, f);
}

pub fn async_head<F>(url: &str, f: F)
where
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_head(url, f);
}

pub fn async_options<F>(url: &str, f: F)
where
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_options(url, f);
}

pub fn async_delete<F>(url: &str, f: F)
where
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_delete(url, f);
}

pub fn async_post<B, F>(url: &str, body: &B, f: F)
where
    B: Serialize + Any,
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_post(url, body, f);
}

pub fn async_put<B, F>(url: &str, body: &B, f: F)
where
    B: Serialize + Any,
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_put(url, body, f);
}

pub fn async_patch<B, F>(url: &str, body: &B, f: F)
where
    B: Serialize + Any,
    F: FnOnce(Response) + Send + 'static,
{
    DEFAULT_BUILDER.async_patch(url, body, f);
}

/// Run `batch` on the default builder and wait for all its requests
pub fn fork_join<F>(batch: F)
where
    F: FnOnce(&Concurrent<'_>),
{
    log::debug!("restful: fork-join batch");
    DEFAULT_BUILDER.fork_join(batch);
}
