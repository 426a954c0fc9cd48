use std::sync::LazyLock;
use std::sync::mpsc;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::{Value, json};

static BASE: LazyLock<String> = LazyLock::new(|| {
    let _ = env_logger::builder().is_test(true).try_init();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind origin");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("origin address");

    let app = Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/cache/user", get(cached_users));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("origin runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("origin server");
        });
    });

    format!("http://{addr}")
});

async fn list_users() -> impl IntoResponse {
    axum::Json(json!([{ "id": 1, "name": "Hernan" }]))
}

async fn create_user(axum::Json(user): axum::Json<Value>) -> impl IntoResponse {
    (StatusCode::CREATED, axum::Json(user))
}

async fn cached_users() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "max-age=30")], axum::Json(json!([{ "id": 1 }])))
}

fn url(path: &str) -> String {
    format!("{}{path}", *BASE)
}

#[test]
fn package_level_verbs() {
    let resp = restful::get(&url("/user"));
    assert_eq!(resp.status(), 200);

    let users: Vec<Value> = resp.fill_up().expect("users");
    assert_eq!(users[0]["name"], "Hernan");

    let created = restful::post(&url("/user"), &json!({ "id": 2, "name": "Pablo" }));
    assert_eq!(created.status(), 201);
}

#[test]
fn package_level_fork_join() {
    let mut pending = Vec::new();

    restful::fork_join(|c| {
        for _ in 0..10 {
            pending.push(c.get(&url("/user")));
        }
    });

    assert!(pending.iter().all(|fr| fr.response().status() == 200));
}

#[test]
fn package_level_async_get() {
    let (tx, rx) = mpsc::channel();

    restful::async_get(&url("/user"), move |resp| {
        let _ = tx.send(resp.status());
    });

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).expect("callback ran"), 200);
}

#[test]
fn default_builder_uses_shared_cache() {
    restful::get(&url("/cache/user"));
    assert!(restful::get(&url("/cache/user")).is_cache_hit());
    assert!(restful::global_cache().len() >= 1);
}

#[test]
fn shorthands_pick_format() {
    assert_eq!(restful::json().get(&url("/user")).format(), restful::ContentType::Json);
    assert_eq!(restful::Restful::xml().get(&url("/user")).format(), restful::ContentType::Xml);
}

#[test]
fn cache_size_knob_reaches_shared_cache() {
    restful::set_max_cache_size(50_000);
    assert_eq!(restful::global_cache().max_entries(), 50_000);
}
