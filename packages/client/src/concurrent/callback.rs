//! Fire-and-forget requests with a completion callback

use std::future::Future;

use super::runtime;
use crate::http::{ContentType, Response};

/// Run `task` on a worker and hand its result to `callback` on that worker.
///
/// Never blocks the caller and never runs `callback` on the caller's thread.
pub(crate) fn submit_with_callback<F, C>(format: ContentType, task: F, callback: C)
where
    F: Future<Output = Response> + Send + 'static,
    C: FnOnce(Response) + Send + 'static,
{
    match runtime::workers() {
        Ok(workers) => {
            workers.spawn(async move {
                let response = task.await;
                // The callback may block, e.g. on a synchronous request.
                tokio::task::block_in_place(move || callback(response));
            });
        }
        Err(e) => {
            let response = Response::from_error(e, format);
            let spawned = std::thread::Builder::new()
                .name("restful-callback".into())
                .spawn(move || callback(response));
            if let Err(e) = spawned {
                tracing::warn!(target: "restful::concurrent", error = %e, "callback dropped");
            }
        }
    }
}
