//! Pooled HTTP/1 transport
//!
//! Sends one outbound request, follows or refuses redirects and collects the
//! full response body.

pub mod configuration;
pub mod core;

pub use configuration::HttpClientBuilder;
pub use core::HttpClient;
pub(crate) use core::{Inbound, Outbound, SendOptions};
