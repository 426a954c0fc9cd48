mod common;

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use common::{User, origin, unique, users};
use restful_client::{RequestBuilder, ResponseCache};

fn builder() -> RequestBuilder {
    common::init_tracing();
    RequestBuilder::json()
        .base_url(origin().base())
        .cache(Arc::new(ResponseCache::default()))
}

#[test]
fn fork_join_settles_every_request() {
    let rb = builder();
    let mut pending = Vec::new();

    rb.fork_join(|c| {
        for _ in 0..250 {
            pending.push(c.get("/user"));
        }
    });

    assert_eq!(pending.len(), 250);
    for fr in &pending {
        assert!(fr.is_ready());
        assert_eq!(fr.response().status(), 200);
    }
}

#[test]
fn large_cached_batch_is_ready_on_return() {
    let rb = builder();
    let path = unique("/cache/user");
    assert_eq!(rb.get(&path).status(), 200);

    let mut pending = Vec::new();
    rb.fork_join(|c| {
        for _ in 0..600 {
            pending.push(c.get(&path));
        }
    });

    assert_eq!(pending.len(), 600);
    assert!(pending.iter().all(|fr| fr.is_ready()));
    assert!(pending.iter().all(|fr| fr.response().is_cache_hit()));
    assert_eq!(origin().hits(&path), 1);
}

#[test]
fn large_failing_batch_is_ready_on_return() {
    let rb = RequestBuilder::json()
        .base_url("http://127.0.0.1:1")
        .cache(Arc::new(ResponseCache::default()));
    let mut pending = Vec::new();

    rb.fork_join(|c| {
        for i in 0..500 {
            pending.push(c.get(&format!("/user/{i}")));
        }
    });

    assert_eq!(pending.len(), 500);
    assert!(pending.iter().all(|fr| fr.is_ready()));
    assert!(pending.iter().all(|fr| fr.response().error().is_some_and(|e| e.is_connect())));
}

#[test]
fn fork_join_mixes_verbs() {
    let rb = builder();
    let user = User { id: 5, name: "Juan".into() };
    let (mut get, mut post, mut delete) = (None, None, None);

    rb.fork_join(|c| {
        get = Some(c.get("/user"));
        post = Some(c.post("/user", &user));
        delete = Some(c.delete("/user/5"));
    });

    let get = get.expect("get issued");
    assert_eq!(get.response().fill_up::<Vec<User>>().expect("users"), users());
    assert_eq!(post.expect("post issued").response().status(), 201);
    assert_eq!(delete.expect("delete issued").response().status(), 200);
}

#[test]
fn empty_batch_returns_immediately() {
    builder().fork_join(|_| {});
}

#[test]
fn failures_settle_inside_a_batch() {
    let rb = RequestBuilder::json().base_url("http://127.0.0.1:1");
    let mut pending = Vec::new();

    rb.fork_join(|c| {
        pending.push(c.get("/user"));
        pending.push(c.head("/user"));
    });

    assert!(pending.iter().all(|fr| fr.response().error().is_some()));
}

#[test]
fn future_response_clones_share_the_result() {
    let rb = builder();
    let mut pending = None;

    rb.fork_join(|c| pending = Some(c.get("/user")));

    let fr = pending.expect("get issued");
    let copy = fr.clone();
    assert_eq!(copy.response().bytes(), fr.response().bytes());
    assert_eq!(fr.into_response().status(), 200);
}

#[test]
fn async_get_runs_callback_off_the_caller_thread() {
    let rb = builder();
    let caller = thread::current().id();
    let (tx, rx) = mpsc::channel();

    rb.async_get("/user", move |resp| {
        let _ = tx.send((resp.status(), thread::current().id()));
    });

    let (status, callback_thread) = rx.recv_timeout(Duration::from_secs(5)).expect("callback ran");
    assert_eq!(status, 200);
    assert_ne!(callback_thread, caller);
}

#[test]
fn async_post_delivers_response() {
    let rb = builder();
    let (tx, rx) = mpsc::channel();

    rb.async_post("/user", &User { id: 8, name: "Ana".into() }, move |resp| {
        let _ = tx.send(resp.fill_up::<User>().map(|u| u.name));
    });

    let name = rx.recv_timeout(Duration::from_secs(5)).expect("callback ran");
    assert_eq!(name.expect("echoed user"), "Ana");
}

#[test]
fn callbacks_may_issue_blocking_requests() {
    let rb = builder();
    let inner = rb.clone();
    let (tx, rx) = mpsc::channel();

    rb.async_get("/user", move |first| {
        let second = inner.get("/user");
        let _ = tx.send((first.status(), second.status()));
    });

    let statuses = rx.recv_timeout(Duration::from_secs(5)).expect("callback ran");
    assert_eq!(statuses, (200, 200));
}

#[test]
fn async_failures_reach_the_callback() {
    let rb = RequestBuilder::json().base_url("http://127.0.0.1:1");
    let (tx, rx) = mpsc::channel();

    rb.async_delete("/user/1", move |resp| {
        let _ = tx.send(resp.error().is_some_and(|e| e.is_connect()));
    });

    assert!(rx.recv_timeout(Duration::from_secs(5)).expect("callback ran"));
}
