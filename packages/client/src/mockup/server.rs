//! Local HTTP/1 listener answering from the stub registry

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{LazyLock, PoisonError, RwLock};

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use super::{MOCK_NOT_FOUND, lookup};
use crate::builder::headers::X_ORIGINAL_URL;
use crate::concurrent::runtime;
use crate::error::{self, Result};

struct MockServer {
    base: Url,
    accept: JoinHandle<()>,
}

static SERVER: LazyLock<RwLock<Option<MockServer>>> = LazyLock::new(|| RwLock::new(None));

/// Start the mock server and route all requests to it.
///
/// Starting an already running server is a no-op.
pub fn start_mockup_server() -> Result<()> {
    let mut server = SERVER.write().unwrap_or_else(PoisonError::into_inner);
    if server.is_some() {
        return Ok(());
    }

    let workers = runtime::workers()?;
    let listener = std::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).map_err(error::connect)?;
    listener.set_nonblocking(true).map_err(error::connect)?;
    let addr = listener.local_addr().map_err(error::connect)?;

    let _entered = workers.enter();
    let listener = TcpListener::from_std(listener).map_err(error::connect)?;
    let base = Url::parse(&format!("http://{addr}")).map_err(error::configuration)?;

    tracing::debug!(target: "restful::mockup", %addr, "mock server listening");

    *server = Some(MockServer {
        base,
        accept: workers.spawn(accept_loop(listener)),
    });
    Ok(())
}

/// Stop the mock server; requests go to their real hosts again.
pub fn stop_mockup_server() {
    let stopped = SERVER.write().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(server) = stopped {
        server.accept.abort();
        tracing::debug!(target: "restful::mockup", base = %server.base, "mock server stopped");
    }
}

pub fn is_mockup_active() -> bool {
    SERVER.read().unwrap_or_else(PoisonError::into_inner).is_some()
}

pub(super) fn base_url() -> Option<Url> {
    SERVER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|s| s.base.clone())
}

async fn accept_loop(listener: TcpListener) {
    loop {
        let stream = match listener.accept().await {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::warn!(target: "restful::mockup", error = %e, "accept failed");
                continue;
            }
        };

        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service_fn(answer))
                .await
            {
                tracing::debug!(target: "restful::mockup", error = %e, "connection closed");
            }
        });
    }
}

async fn answer(req: Request<Incoming>) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let mock = req
        .headers()
        .get(X_ORIGINAL_URL)
        .and_then(|v| v.to_str().ok())
        .and_then(|original| lookup(req.method(), original));

    let Some(mock) = mock else {
        tracing::debug!(target: "restful::mockup", method = %req.method(), "no mock matched");
        return Ok(not_found());
    };

    let mut resp = Response::new(Full::new(Bytes::from(mock.resp_body.clone())));
    *resp.status_mut() = StatusCode::from_u16(mock.resp_http_code).unwrap_or(StatusCode::OK);
    for (name, value) in &mock.resp_headers {
        resp.headers_mut().append(name.clone(), value.clone());
    }
    Ok(resp)
}

fn not_found() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(MOCK_NOT_FOUND.as_bytes())));
    *resp.status_mut() = StatusCode::BAD_REQUEST;
    resp
}
