use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A Result alias where the Err case is `restful_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Shared, cloneable error source.
pub(crate) type SharedSource = Arc<dyn StdError + Send + Sync>;

/// Represents every failure a single request can settle with.
///
/// Errors never abort a batch: they are carried on the [`Response`](crate::Response)
/// of the request that produced them.
#[derive(Clone)]
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

#[derive(Clone)]
pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<SharedSource>,
    pub(crate) url: Option<url::Url>,
}

/// Error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Malformed base or target URL, or an invalid builder setting.
    Configuration,
    /// Request body could not be marshalled for the configured format.
    Serialization,
    /// Dial, proxy or connect-timeout failure.
    Connect,
    /// Response headers did not arrive within the configured timeout.
    ResponseTimeout,
    /// A redirect was attempted while redirect-follow was disabled.
    RedirectBlocked,
    /// Any other network-layer failure.
    Transport,
    /// Inbound body could not be decoded into the requested type.
    Parse,
    /// The request task ended before settling its result.
    Canceled,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(Arc::from(source.into()));
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    /// The error category.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("restful::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Configuration => f.write_str("configuration error")?,
            Kind::Serialization => f.write_str("error serializing request body")?,
            Kind::Connect => f.write_str("error connecting")?,
            Kind::ResponseTimeout => f.write_str("timeout awaiting response headers")?,
            Kind::RedirectBlocked => f.write_str("avoided redirect attempt")?,
            Kind::Transport => f.write_str("error sending request")?,
            Kind::Parse => f.write_str("error decoding response body")?,
            Kind::Canceled => f.write_str("request canceled")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        let mut source = StdError::source(self);
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
