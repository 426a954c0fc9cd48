//! Fork-join batches
//!
//! Requests issued through [`Concurrent`] start immediately. The batch call
//! returns only after every one of them has settled.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use crossbeam_utils::sync::WaitGroup;
use http::Method;
use serde::Serialize;

use super::future::FutureResponse;
use crate::builder::RequestBuilder;
use crate::error::Result;

/// Request issuer handed to a fork-join batch.
pub struct Concurrent<'a> {
    builder: &'a RequestBuilder,
    wait: WaitGroup,
    launched: AtomicUsize,
}

impl Concurrent<'_> {
    fn launch(&self, method: Method, url: &str, body: Result<Bytes>) -> FutureResponse {
        self.launched.fetch_add(1, Ordering::Relaxed);
        self.builder.launch(method, url, body, Some(self.wait.clone()))
    }

    pub fn get(&self, url: &str) -> FutureResponse {
        self.launch(Method::GET, url, Ok(Bytes::new()))
    }

    pub fn head(&self, url: &str) -> FutureResponse {
        self.launch(Method::HEAD, url, Ok(Bytes::new()))
    }

    pub fn options(&self, url: &str) -> FutureResponse {
        self.launch(Method::OPTIONS, url, Ok(Bytes::new()))
    }

    pub fn delete(&self, url: &str) -> FutureResponse {
        self.launch(Method::DELETE, url, Ok(Bytes::new()))
    }

    pub fn post<B: Serialize + Any>(&self, url: &str, body: &B) -> FutureResponse {
        self.launch(Method::POST, url, self.builder.marshal(body))
    }

    pub fn put<B: Serialize + Any>(&self, url: &str, body: &B) -> FutureResponse {
        self.launch(Method::PUT, url, self.builder.marshal(body))
    }

    pub fn patch<B: Serialize + Any>(&self, url: &str, body: &B) -> FutureResponse {
        self.launch(Method::PATCH, url, self.builder.marshal(body))
    }
}

/// Run `batch` and wait for every request it launched.
pub(crate) fn fork_join<F>(builder: &RequestBuilder, batch: F)
where
    F: FnOnce(&Concurrent<'_>),
{
    let concurrent = Concurrent {
        builder,
        wait: WaitGroup::new(),
        launched: AtomicUsize::new(0),
    };

    batch(&concurrent);

    let Concurrent { wait, launched, .. } = concurrent;
    tracing::debug!(
        target: "restful::concurrent",
        launched = launched.into_inner(),
        "fork-join waiting for batch"
    );
    wait.wait();
}
