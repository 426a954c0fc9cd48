//! Single-assignment result handle

use std::sync::{Arc, OnceLock};

use crossbeam_channel::{Receiver, Sender};

use crate::error;
use crate::http::{ContentType, Response};

/// The task owning a promise ended without settling it.
#[derive(Debug, thiserror::Error)]
#[error("request task ended without a result")]
pub struct Abandoned;

/// Handle to the eventual [`Response`] of one in-flight request.
///
/// Reading blocks until the request settles; every later read returns the same
/// value. Clones read the same slot.
#[derive(Clone)]
pub struct FutureResponse {
    slot: Arc<Slot>,
}

struct Slot {
    value: OnceLock<Response>,
    rx: Receiver<Response>,
    format: ContentType,
}

/// Write side of a [`FutureResponse`]. Fulfilled at most once.
pub(crate) struct Promise {
    tx: Sender<Response>,
}

pub(crate) fn pair(format: ContentType) -> (Promise, FutureResponse) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let handle = FutureResponse {
        slot: Arc::new(Slot {
            value: OnceLock::new(),
            rx,
            format,
        }),
    };
    (Promise { tx }, handle)
}

impl Promise {
    pub(crate) fn fulfill(self, response: Response) {
        // The reader may be gone already, which is fine.
        let _ = self.tx.send(response);
    }
}

impl Slot {
    fn settle(&self) -> &Response {
        self.value.get_or_init(|| {
            self.rx.recv().unwrap_or_else(|_| {
                tracing::warn!(target: "restful::concurrent", "request task dropped its result");
                Response::from_error(error::canceled(Abandoned), self.format)
            })
        })
    }
}

impl FutureResponse {
    /// Block until the request settles and borrow its response.
    pub fn response(&self) -> &Response {
        self.slot.settle()
    }

    /// True once the response can be read without blocking.
    pub fn is_ready(&self) -> bool {
        self.slot.value.get().is_some() || !self.slot.rx.is_empty()
    }

    /// Block until the request settles and take the response.
    pub fn into_response(self) -> Response {
        match Arc::try_unwrap(self.slot) {
            Ok(slot) => {
                let format = slot.format;
                slot.settle();
                slot.value
                    .into_inner()
                    .unwrap_or_else(|| Response::from_error(error::canceled(Abandoned), format))
            }
            Err(shared) => shared.settle().clone(),
        }
    }
}

impl std::fmt::Debug for FutureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FutureResponse")
            .field("settled", &self.slot.value.get().is_some())
            .finish()
    }
}
