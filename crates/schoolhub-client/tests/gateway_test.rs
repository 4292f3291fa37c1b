//! Integration tests for the request gateway's token and 401 handling.

mod helpers;

use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tokio::sync::broadcast::error::TryRecvError;

use schoolhub_core::error::ErrorKind;
use schoolhub_core::traits::SessionProvider;
use schoolhub_core::types::{ClearReason, SessionEvent};

use helpers::{MockBackend, context, context_with_timeout, token};

#[tokio::test]
async fn test_no_token_waits_then_sends_without_header() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/dashboard/parent", 401, json!({"detail": "Not authenticated"}));
    let (ctx, store) = context(&backend, 200);
    let mut events = store.subscribe();

    let started = Instant::now();
    let err = ctx
        .gateway
        .get_json::<Value>("/dashboard/parent")
        .await
        .unwrap_err();

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert!(err.is_unauthorized());
    assert!(err.message.contains("Not authenticated"));

    let sent = backend.requests_to("/dashboard/parent");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].authorization, None);

    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Cleared {
            reason: ClearReason::Unauthorized
        }
    );
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_token_arriving_mid_wait_is_attached() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/dashboard/teacher", 200, json!({"name": "Ana"}));
    let (ctx, store) = context(&backend, 5_000);
    let bearer = token("teacher", Some("Ana"));

    let writer = {
        let store = store.clone();
        let bearer = bearer.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            store.set(&bearer).await.unwrap();
        })
    };

    let started = Instant::now();
    let body: Value = ctx.gateway.get_json("/dashboard/teacher").await.unwrap();
    writer.await.unwrap();

    assert_eq!(body["name"], "Ana");
    assert!(started.elapsed() < Duration::from_secs(5));
    let sent = backend.requests_to("/dashboard/teacher");
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some(format!("Bearer {bearer}").as_str())
    );
}

#[tokio::test]
async fn test_stored_token_is_attached() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/dashboard/admin", 200, json!({}));
    let (ctx, store) = context(&backend, 5_000);
    let bearer = token("admin", None);
    store.set(&bearer).await.unwrap();

    let _: Value = ctx.gateway.get_json("/dashboard/admin").await.unwrap();

    let sent = backend.requests_to("/dashboard/admin");
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some(format!("Bearer {bearer}").as_str())
    );
}

#[tokio::test]
async fn test_public_endpoint_sends_no_header_and_does_not_wait() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/auth/register", 200, json!({"id": 1}));
    let (ctx, _store) = context(&backend, 2_000);

    let started = Instant::now();
    let _: Value = ctx
        .gateway
        .post_json("/auth/register", &json!({"username": "mia"}))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(backend.requests_to("/auth/register")[0].authorization, None);
}

#[tokio::test]
async fn test_public_endpoint_omits_header_even_with_token() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/token", 200, json!({"access_token": token("parent", None)}));
    let (ctx, store) = context(&backend, 2_000);
    store.set(&token("parent", None)).await.unwrap();

    let _: Value = ctx
        .gateway
        .post_form("/token", &[("username", "mia"), ("password", "pw")])
        .await
        .unwrap();

    assert_eq!(backend.requests_to("/token")[0].authorization, None);
}

#[tokio::test]
async fn test_401_on_public_endpoint_keeps_session() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/token", 401, json!({"detail": "Incorrect username or password"}));
    let (ctx, store) = context(&backend, 2_000);
    store.set(&token("parent", None)).await.unwrap();
    let mut events = store.subscribe();

    let err = ctx
        .gateway
        .post_form::<_, Value>("/token", &[("username", "mia"), ("password", "nope")])
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(store.get().await.unwrap().is_authenticated());
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_server_error_passes_through_without_side_effects() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/dashboard/admin", 500, json!({"detail": "boom"}));
    let (ctx, store) = context(&backend, 2_000);
    store.set(&token("admin", None)).await.unwrap();
    let mut events = store.subscribe();

    let err = ctx
        .gateway
        .get_json::<Value>("/dashboard/admin")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Http);
    assert_eq!(err.status, Some(500));
    assert!(err.message.contains("boom"));
    assert!(store.get().await.unwrap().is_authenticated());
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(backend.requests_to("/dashboard/admin").len(), 1);
}

#[tokio::test]
async fn test_authenticated_401_clears_session_once() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/classes/3", 401, json!({"detail": "Token expired"}));
    let (ctx, store) = context(&backend, 2_000);
    store.set(&token("teacher", None)).await.unwrap();
    let mut events = store.subscribe();

    let err = ctx
        .gateway
        .get_json::<Value>("/classes/3")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!store.get().await.unwrap().is_authenticated());
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Cleared {
            reason: ClearReason::Unauthorized
        }
    );
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_slow_backend_is_a_network_error() {
    let backend = MockBackend::start().await;
    backend.respond_after(
        "GET",
        "/dashboard/parent",
        Duration::from_secs(3),
        200,
        json!({}),
    );
    let (ctx, store) = context_with_timeout(&backend, 1_000, 1);
    store.set(&token("parent", None)).await.unwrap();

    let err = ctx
        .gateway
        .get_json::<Value>("/dashboard/parent")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, None);
    assert!(store.get().await.unwrap().is_authenticated());
}

#[tokio::test]
async fn test_401_for_replaced_token_keeps_new_session() {
    let backend = MockBackend::start().await;
    backend.respond_after(
        "GET",
        "/dashboard/parent",
        Duration::from_millis(300),
        401,
        json!({"detail": "Token expired"}),
    );
    let (ctx, store) = context(&backend, 1_000);
    let old = token("parent", Some("Mia"));
    let new = token("teacher", Some("Ana"));
    store.set(&old).await.unwrap();

    let request = {
        let gateway = ctx.gateway.clone();
        tokio::spawn(async move { gateway.get_json::<Value>("/dashboard/parent").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.set(&new).await.unwrap();
    let mut events = store.subscribe();

    let err = request.await.unwrap().unwrap_err();

    assert!(err.is_unauthorized());
    let sent = &backend.requests_to("/dashboard/parent")[0];
    assert_eq!(
        sent.authorization.as_deref(),
        Some(format!("Bearer {old}").as_str())
    );
    assert_eq!(store.get().await.unwrap().token, Some(new));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}
