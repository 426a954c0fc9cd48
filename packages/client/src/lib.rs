//! # restful_client
//!
//! Synchronous-looking HTTP client for REST services, with a shared response
//! cache and fork-join batches.
//!
//! Every call runs on a shared worker runtime. `GET`, `HEAD` and `OPTIONS`
//! responses are cached according to `Cache-Control: max-age`, `Expires`,
//! `ETag` and `Last-Modified`. An entry with a lifetime is served until it
//! expires and is then fetched again in full. An entry with validators and no
//! lifetime is revalidated with a conditional request on every use.
//!
//! ## Usage
//!
//! ```no_run
//! use restful_client::RequestBuilder;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let rb = RequestBuilder::json().base_url("http://localhost:8080");
//!
//! let resp = rb.get("/user/1");
//! let user: User = resp.fill_up()?;
//! println!("{} {}", user.id, user.name);
//!
//! let mut users = Vec::new();
//! rb.fork_join(|c| {
//!     users.push(c.get("/user/1"));
//!     users.push(c.get("/user/2"));
//! });
//! # Ok::<(), restful_client::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod builder;
pub mod cache;
pub mod client;
pub mod concurrent;
pub mod config;
pub mod connect;
pub mod error;
pub mod http;
pub mod mockup;
pub mod prelude;
pub mod proxy;
pub mod redirect;

pub use crate::prelude::*;
pub use cache::{global_cache, set_max_cache_size};
