//! Core HTTP client implementation

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::LOCATION;
use http::{HeaderMap, Method, Request, StatusCode, Version};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::client::legacy::Client;
use tokio::sync::watch;
use tokio::time::Instant;
use url::Url;

use crate::connect::{DIAL_PHASE, DialPhase, PoolConnector};
use crate::error::{self, Result};
use crate::redirect::{self, Action, Attempt, Policy};

type Pool = Client<PoolConnector, Full<Bytes>>;

/// A pooled HTTP/1 transport.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    pool: Pool,
}

/// A fully decorated request ready to be sent.
#[derive(Debug, Clone)]
pub(crate) struct Outbound {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

/// Status line, headers and complete body of the final response.
#[derive(Debug)]
pub(crate) struct Inbound {
    pub(crate) status: StatusCode,
    pub(crate) version: Version,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

/// Per-call transport settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SendOptions {
    pub(crate) response_timeout: Option<Duration>,
    pub(crate) redirect: Policy,
}

impl HttpClient {
    pub(crate) fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Send `outbound`, following redirects as `options` allows, and read the
    /// final body to the end.
    pub(crate) async fn send(&self, outbound: Outbound, options: SendOptions) -> Result<Inbound> {
        let Outbound {
            mut method,
            mut url,
            mut headers,
            mut body,
        } = outbound;
        let mut previous: Vec<Url> = Vec::new();

        loop {
            let request = build_request(&method, &url, &headers, body.clone())?;
            let response = self.dispatch(request, options.response_timeout, &url).await?;
            let status = response.status();

            if redirect::is_redirect(status)
                && let Some(next) = location(response.headers(), &url)
            {
                previous.push(url.clone());
                let attempt = Attempt {
                    status,
                    next: &next,
                    previous: &previous,
                };

                match options.redirect.check(attempt) {
                    Action::Follow => {
                        redirect::remove_sensitive_headers(&mut headers, &next, &previous);
                        if let Some(get) = redirect::redirect_method(status, &method, &mut headers) {
                            method = get;
                            body = Bytes::new();
                        }
                        url = next;
                        continue;
                    }
                    Action::Error(e) => return Err(error::redirect_blocked(e, url)),
                }
            }

            let (parts, incoming) = response.into_parts();
            let body = incoming
                .collect()
                .await
                .map_err(|e| error::transport(e).with_url(url.clone()))?
                .to_bytes();

            return Ok(Inbound {
                status: parts.status,
                version: parts.version,
                headers: parts.headers,
                body,
            });
        }
    }

    /// Send one request and wait for its response head.
    ///
    /// The response timeout is not charged for time spent dialing a new
    /// connection: it restarts once this request's dial settles, and the dial
    /// itself is bounded by the connector's connect timeout.
    async fn dispatch(
        &self,
        request: Request<Full<Bytes>>,
        response_timeout: Option<Duration>,
        url: &Url,
    ) -> Result<http::Response<Incoming>> {
        let classify = |e: hyper_util::client::legacy::Error| {
            let err = if e.is_connect() {
                error::connect(e)
            } else {
                error::transport(e)
            };
            err.with_url(url.clone())
        };

        let Some(limit) = response_timeout else {
            return self.pool.request(request).await.map_err(classify);
        };

        let (phase, mut dial) = watch::channel(DialPhase::Idle);
        let phase = Arc::new(phase);
        let pending = DIAL_PHASE.scope(Arc::clone(&phase), self.pool.request(request));
        tokio::pin!(pending);

        let started = Instant::now();
        loop {
            let deadline = match *dial.borrow_and_update() {
                DialPhase::Idle => Some(started + limit),
                DialPhase::Dialing => None,
                DialPhase::Dialed(at) => Some(at + limit),
            };

            tokio::select! {
                result = &mut pending => return result.map_err(classify),
                // `phase` is held here, so the channel cannot close.
                _ = dial.changed() => continue,
                () = sleep_until(deadline) => {
                    return Err(error::response_timeout(ResponseHeaderTimeout(limit)).with_url(url.clone()));
                }
            }
        }
    }
}

/// No response head arrived in time.
#[derive(Debug, thiserror::Error)]
#[error("no response within {0:?}")]
struct ResponseHeaderTimeout(Duration);

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn build_request(method: &Method, url: &Url, headers: &HeaderMap, body: Bytes) -> Result<Request<Full<Bytes>>> {
    let mut request = Request::builder()
        .method(method.clone())
        .uri(url.as_str())
        .body(Full::new(body))
        .map_err(|e| error::configuration(e).with_url(url.clone()))?;
    *request.headers_mut() = headers.clone();
    Ok(request)
}

fn location(headers: &HeaderMap, base: &Url) -> Option<Url> {
    let raw = headers.get(LOCATION)?.to_str().ok()?;
    base.join(raw).ok()
}
