//! Concurrent execution
//!
//! Every request runs as a task on a shared multi-threaded worker runtime.
//! Synchronous verbs block on the task's [`FutureResponse`], fork-join blocks
//! on a barrier over all tasks it launched, and async verbs hand the result to
//! a callback on the worker that completed the request.

pub mod callback;
pub mod fork_join;
pub mod future;
pub mod runtime;

pub use fork_join::Concurrent;
pub use future::FutureResponse;
