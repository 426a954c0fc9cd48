//! Request verbs: synchronous, async with callback, and fork-join

use std::any::Any;

use bytes::Bytes;
use crossbeam_utils::sync::WaitGroup;
use http::Method;
use serde::Serialize;

use super::core::RequestBuilder;
use super::execute::execute;
use crate::concurrent::{Concurrent, FutureResponse, callback, fork_join, runtime};
use crate::error::Result;
use crate::http::Response;

impl RequestBuilder {
    pub(crate) fn launch(&self, method: Method, url: &str, body: Result<Bytes>, guard: Option<WaitGroup>) -> FutureResponse {
        let task = execute(self.clone(), method, url.to_owned(), body);
        runtime::submit(self.config.content_type, task, guard)
    }

    fn call(&self, method: Method, url: &str, body: Result<Bytes>) -> Response {
        self.launch(method, url, body, None).into_response()
    }

    fn call_async<F>(&self, method: Method, url: &str, body: Result<Bytes>, f: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        let task = execute(self.clone(), method, url.to_owned(), body);
        callback::submit_with_callback(self.config.content_type, task, f);
    }

    /// Issue a GET, served from the cache when possible
    pub fn get(&self, url: &str) -> Response {
        self.call(Method::GET, url, Ok(Bytes::new()))
    }

    pub fn head(&self, url: &str) -> Response {
        self.call(Method::HEAD, url, Ok(Bytes::new()))
    }

    pub fn options(&self, url: &str) -> Response {
        self.call(Method::OPTIONS, url, Ok(Bytes::new()))
    }

    pub fn delete(&self, url: &str) -> Response {
        self.call(Method::DELETE, url, Ok(Bytes::new()))
    }

    /// Issue a POST with `body` marshalled in the builder's format
    pub fn post<B: Serialize + Any>(&self, url: &str, body: &B) -> Response {
        self.call(Method::POST, url, self.marshal(body))
    }

    pub fn put<B: Serialize + Any>(&self, url: &str, body: &B) -> Response {
        self.call(Method::PUT, url, self.marshal(body))
    }

    pub fn patch<B: Serialize + Any>(&self, url: &str, body: &B) -> Response {
        self.call(Method::PATCH, url, self.marshal(body))
    }

    /// Issue a GET without blocking; `f` runs on a worker once it settles
    pub fn async_get<F>(&self, url: &str, f: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::GET, url, Ok(Bytes::new()), f);
    }

    pub fn async_head<F>(&self, url: &str, f: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::HEAD, url, Ok(Bytes::new()), f);
    }

    pub fn async_options<F>(&self, url: &str, f: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::OPTIONS, url, Ok(Bytes::new()), f);
    }

    pub fn async_delete<F>(&self, url: &str, f: F)
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::DELETE, url, Ok(Bytes::new()), f);
    }

    pub fn async_post<B, F>(&self, url: &str, body: &B, f: F)
    where
        B: Serialize + Any,
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::POST, url, self.marshal(body), f);
    }

    pub fn async_put<B, F>(&self, url: &str, body: &B, f: F)
    where
        B: Serialize + Any,
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::PUT, url, self.marshal(body), f);
    }

    pub fn async_patch<B, F>(&self, url: &str, body: &B, f: F)
    where
        B: Serialize + Any,
        F: FnOnce(Response) + Send + 'static,
    {
        self.call_async(Method::PATCH, url, self.marshal(body), f);
    }

    /// Run `batch`, then block until every request it issued has settled.
    ///
    /// ```no_run
    /// use restful_client::RequestBuilder;
    ///
    /// let rb = RequestBuilder::json().base_url("http://localhost:8080");
    /// let mut users = Vec::new();
    ///
    /// rb.fork_join(|c| {
    ///     for id in 1..=3 {
    ///         users.push(c.get(&format!("/user/{id}")));
    ///     }
    /// });
    ///
    /// for user in &users {
    ///     println!("{}", user.response().status());
    /// }
    /// ```
    pub fn fork_join<F>(&self, batch: F)
    where
        F: FnOnce(&Concurrent<'_>),
    {
        fork_join::fork_join(self, batch);
    }
}
