use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a malformed URL or builder setting.
pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Configuration).with(e.into())
}

/// Creates an `Error` for a request body that could not be marshalled.
pub fn serialization<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Serialization).with(e.into())
}

/// Creates an `Error` for a dial, proxy or connect-timeout failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for an exceeded response-header timeout.
pub fn response_timeout<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::ResponseTimeout).with(e.into())
}

/// Creates an `Error` for a redirect that policy refused to follow.
pub fn redirect_blocked<E: Into<BoxError>>(e: E, url: url::Url) -> Error {
    Error::new(Kind::RedirectBlocked).with(e.into()).with_url(url)
}

/// Creates an `Error` for any other network failure.
pub fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Transport).with(e.into())
}

/// Creates an `Error` for a body that could not be decoded.
pub fn parse<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Parse).with(e.into())
}

/// Creates an `Error` for a request task that never settled.
pub fn canceled<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Canceled).with(e.into())
}
