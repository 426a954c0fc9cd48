//! Process-wide worker runtime

use std::future::Future;
use std::sync::OnceLock;

use crossbeam_utils::sync::WaitGroup;
use tokio::runtime::{Builder, Runtime};

use super::future::{self, FutureResponse};
use crate::error::{self, Result};
use crate::http::{ContentType, Response};

static WORKERS: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();

/// The worker runtime could not be started.
#[derive(Debug, thiserror::Error)]
#[error("worker runtime unavailable: {0}")]
pub struct WorkersUnavailable(String);

/// The worker runtime, started on first use.
pub(crate) fn workers() -> Result<&'static Runtime> {
    let started = WORKERS.get_or_init(|| {
        Builder::new_multi_thread()
            .enable_all()
            .thread_name("restful-worker")
            .build()
            .map_err(|e| {
                tracing::warn!(target: "restful::concurrent", error = %e, "failed to start worker runtime");
                e.to_string()
            })
    });

    match started {
        Ok(runtime) => Ok(runtime),
        Err(reason) => Err(error::canceled(WorkersUnavailable(reason.clone()))),
    }
}

/// Run `task` on a worker and return the handle to its result.
///
/// `guard` is released only after the result is settled.
pub(crate) fn submit<F>(format: ContentType, task: F, guard: Option<WaitGroup>) -> FutureResponse
where
    F: Future<Output = Response> + Send + 'static,
{
    let (promise, handle) = future::pair(format);

    match workers() {
        Ok(runtime) => {
            runtime.spawn(async move {
                promise.fulfill(task.await);
                drop(guard);
            });
        }
        Err(e) => {
            promise.fulfill(Response::from_error(e, format));
            drop(guard);
        }
    }

    handle
}
