//! Local origin server shared by the integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, SystemTime};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use restful_client::cache::httpdate;
use serde::{Deserialize, Serialize};

pub const ETAG: &str = "\"1234\"";
pub const LAST_MODIFIED: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

pub fn users() -> Vec<User> {
    vec![
        User { id: 1, name: "Hernan".into() },
        User { id: 2, name: "Pablo".into() },
    ]
}

/// Origin server with per-path request counters
pub struct Origin {
    addr: SocketAddr,
    hits: Arc<DashMap<String, usize>>,
}

impl Origin {
    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests that reached the origin for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.hits.get(path).map_or(0, |h| *h)
    }
}

static ORIGIN: LazyLock<Origin> = LazyLock::new(|| {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind origin");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("origin address");
    let hits = Arc::new(DashMap::new());

    let app = Router::new().fallback(handle).with_state(Arc::clone(&hits));

    std::thread::Builder::new()
        .name("test-origin".into())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("origin runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("origin server");
            });
        })
        .expect("origin thread");

    Origin { addr, hits }
});

pub fn origin() -> &'static Origin {
    &ORIGIN
}

/// Path that no other test uses, so hit counts stay independent
pub fn unique(prefix: &str) -> String {
    static NEXT: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    format!("{prefix}/{n}-{}", fastrand::u32(..))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn handle(
    State(hits): State<Arc<DashMap<String, usize>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    *hits.entry(path.clone()).or_insert(0) += 1;

    if let Some(rest) = path.strip_prefix("/slow") {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        if rest.starts_with("/user") {
            return axum::Json(users()).into_response();
        }
    }

    if path == "/header" {
        let echoed: BTreeMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        return axum::Json(echoed).into_response();
    }

    // `/redirect/<tail>` points at `/user/<tail>`.
    if let Some(tail) = path.strip_prefix("/redirect") {
        let location = format!("/user{tail}");
        return (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    }

    if path.starts_with("/xml/user") {
        let xml = "<User><id>1</id><name>Hernan</name></User>";
        return ([(header::CONTENT_TYPE, "application/xml")], xml).into_response();
    }

    if path.starts_with("/cache/etag") {
        if headers.get(header::IF_NONE_MATCH).is_some_and(|v| v == ETAG) {
            return (StatusCode::NOT_MODIFIED, [(header::ETAG, ETAG)]).into_response();
        }
        return ([(header::ETAG, ETAG)], axum::Json(users())).into_response();
    }

    if path.starts_with("/cache/lastmodified") {
        if headers.contains_key(header::IF_MODIFIED_SINCE) {
            return StatusCode::NOT_MODIFIED.into_response();
        }
        return ([(header::LAST_MODIFIED, LAST_MODIFIED)], axum::Json(users())).into_response();
    }

    if path.starts_with("/cache/expires") {
        let expires = httpdate::fmt_http_date(SystemTime::now() + Duration::from_secs(30));
        return ([(header::EXPIRES, expires)], axum::Json(users())).into_response();
    }

    if path.starts_with("/cache/short") {
        return ([(header::CACHE_CONTROL, "max-age=1")], axum::Json(users())).into_response();
    }

    if path.starts_with("/cache/notfound") {
        return (StatusCode::NOT_FOUND, [(header::CACHE_CONTROL, "max-age=30")], "missing").into_response();
    }

    if path.starts_with("/cache") {
        return ([(header::CACHE_CONTROL, "max-age=30")], axum::Json(users())).into_response();
    }

    if path.starts_with("/user") {
        return user_route(method, body);
    }

    StatusCode::NOT_FOUND.into_response()
}

fn user_route(method: Method, body: Bytes) -> Response {
    match method {
        Method::GET => axum::Json(users()).into_response(),
        Method::HEAD => StatusCode::OK.into_response(),
        Method::OPTIONS => {
            let mut resp = StatusCode::OK.into_response();
            resp.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS"));
            resp
        }
        Method::POST => match serde_json::from_slice::<User>(&body) {
            Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
            Err(_) => StatusCode::BAD_REQUEST.into_response(),
        },
        Method::PUT | Method::PATCH => match serde_json::from_slice::<User>(&body) {
            Ok(user) => axum::Json(user).into_response(),
            Err(_) => StatusCode::BAD_REQUEST.into_response(),
        },
        Method::DELETE => StatusCode::OK.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
