//! Configuration errors

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid proxy {proxy:?}: {reason}")]
    InvalidProxy { proxy: String, reason: String },

    #[error("unsupported url scheme {0:?}, only http is supported")]
    UnsupportedScheme(String),

    #[error("invalid header value for {0}")]
    InvalidHeader(String),
}
