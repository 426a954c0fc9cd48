//! Types most callers need

pub use crate::builder::{BasicAuth, RequestBuilder};
pub use crate::cache::{CacheKey, ResponseCache};
pub use crate::concurrent::{Concurrent, FutureResponse};
pub use crate::config::{CustomPool, TimeoutConfig};
pub use crate::error::{Error, Kind, Result};
pub use crate::http::{ContentType, Response};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};
pub use url::Url;
