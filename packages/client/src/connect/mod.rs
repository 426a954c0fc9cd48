//! Connection establishment for the pooled transport
//!
//! `PoolConnector` is the `tower::Service<Uri>` handed to the hyper-util pool.
//! It dials the destination directly or, when the proxy matcher intercepts it,
//! dials the forward proxy and marks the connection as proxied so requests are
//! written in absolute form.
//!
//! A request that wants to know when its own dial starts and ends scopes a
//! [`DIAL_PHASE`] sender around the pool future; the connector reports to it.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::Uri;
use hyper_util::client::legacy::connect::{Connected, Connection, HttpConnector};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::Instant;
use tower::Service;

use crate::error::BoxError;
use crate::proxy::ProxyMatcher;

/// Dialing a forward proxy failed.
#[derive(Debug, thiserror::Error)]
#[error("error connecting to proxy {proxy}")]
pub struct ProxyConnectError {
    proxy: Uri,
    #[source]
    source: BoxError,
}

/// Where a request stands with respect to opening a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DialPhase {
    /// No dial was started for this request, e.g. an idle connection was reused.
    Idle,
    Dialing,
    /// The dial settled, successfully or not, at this instant.
    Dialed(Instant),
}

tokio::task_local! {
    pub(crate) static DIAL_PHASE: Arc<watch::Sender<DialPhase>>;
}

/// Connector used by every transport pool.
#[derive(Clone, Debug)]
pub struct PoolConnector {
    http: HttpConnector,
    proxy: ProxyMatcher,
}

impl PoolConnector {
    pub fn new(connect_timeout: Option<Duration>, proxy: ProxyMatcher) -> Self {
        let mut http = HttpConnector::new();
        http.set_connect_timeout(connect_timeout);
        http.set_nodelay(true);
        http.enforce_http(true);

        Self { http, proxy }
    }
}

type Connecting = Pin<Box<dyn Future<Output = Result<PoolStream, BoxError>> + Send>>;

impl Service<Uri> for PoolConnector {
    type Response = PoolStream;
    type Error = BoxError;
    type Future = Connecting;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.http.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, dst: Uri) -> Self::Future {
        let proxy = self.proxy.intercept(&dst).cloned();
        let mut http = self.http.clone();
        let phase = DIAL_PHASE.try_with(Arc::clone).ok();

        Box::pin(async move {
            if let Some(phase) = &phase {
                phase.send_replace(DialPhase::Dialing);
            }

            let stream = match proxy {
                Some(proxy) => {
                    tracing::trace!(target: "restful::transport", %dst, %proxy, "dialing through proxy");
                    http.call(proxy.clone())
                        .await
                        .map(|io| PoolStream { io, proxied: true })
                        .map_err(|e| BoxError::from(ProxyConnectError { proxy, source: e.into() }))
                }
                None => http
                    .call(dst)
                    .await
                    .map(|io| PoolStream { io, proxied: false })
                    .map_err(BoxError::from),
            };

            if let Some(phase) = &phase {
                phase.send_replace(DialPhase::Dialed(Instant::now()));
            }
            stream
        })
    }
}

/// A pooled TCP connection.
pub struct PoolStream {
    io: TokioIo<TcpStream>,
    proxied: bool,
}

impl Connection for PoolStream {
    fn connected(&self) -> Connected {
        self.io.connected().proxy(self.proxied)
    }
}

impl hyper::rt::Read for PoolStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: hyper::rt::ReadBufCursor<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.io).poll_read(cx, buf)
    }
}

impl hyper::rt::Write for PoolStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.io).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.io).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.io).poll_shutdown(cx)
    }

    fn is_write_vectored(&self) -> bool {
        self.io.is_write_vectored()
    }

    fn poll_write_vectored(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.io).poll_write_vectored(cx, bufs)
    }
}
