//! Request builder
//!
//! A [`RequestBuilder`] holds the per-call configuration, lazily builds its
//! transport once and runs every call through the cache-aware pipeline in
//! [`execute`].

pub mod configuration;
pub mod core;
pub mod execute;
pub mod headers;
pub mod methods;

pub use core::RequestBuilder;
pub use headers::BasicAuth;
