//! Integration tests for the typed backend API.

mod helpers;

use serde_json::json;

use schoolhub_client::dto::{CreateAnnouncementRequest, RegisterRequest, TargetAudience};
use schoolhub_core::error::ErrorKind;
use schoolhub_core::traits::SessionProvider;
use schoolhub_core::types::Role;

use helpers::{MockBackend, context, token};

#[tokio::test]
async fn test_login_stores_session_and_lands_on_dashboard() {
    let backend = MockBackend::start().await;
    backend.respond(
        "POST",
        "/token",
        200,
        json!({"access_token": token("parent", Some("Mia")), "token_type": "bearer"}),
    );
    let (ctx, store) = context(&backend, 1_000);

    let session = ctx.auth.login("mia", "secret-password").await.unwrap();
    assert_eq!(session.role.as_deref(), Some("parent"));
    assert_eq!(session.display_name.as_deref(), Some("Mia"));
    assert_eq!(store.get().await.unwrap(), session);

    let sent = &backend.requests_to("/token")[0];
    assert!(sent.body.contains("username=mia"));
    assert!(sent.body.contains("grant_type=password"));

    assert_eq!(
        ctx.auth.landing_route(&session).await.unwrap(),
        "/parent-dashboard"
    );
    let nav = ctx.navigator.navigate("/parent-dashboard").await.unwrap();
    assert!(!nav.was_redirected());
}

#[tokio::test]
async fn test_unsupported_role_is_cleared_after_login() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/token", 200, json!({"access_token": token("janitor", None)}));
    let (ctx, store) = context(&backend, 1_000);

    let session = ctx.auth.login("sam", "secret-password").await.unwrap();
    let err = ctx.auth.landing_route(&session).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.message.contains("\"janitor\""));
    assert!(!store.get().await.unwrap().is_authenticated());
}

#[tokio::test]
async fn test_login_with_malformed_token_persists_nothing() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/token", 200, json!({"access_token": "abc.def"}));
    let (ctx, store) = context(&backend, 1_000);

    let err = ctx.auth.login("mia", "secret-password").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert!(!store.get().await.unwrap().is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let backend = MockBackend::start().await;
    let (ctx, store) = context(&backend, 1_000);
    store.set(&token("teacher", None)).await.unwrap();

    ctx.auth.logout().await.unwrap();

    assert!(!store.get().await.unwrap().is_authenticated());
    let nav = ctx.navigator.navigate("/teacher-dashboard").await.unwrap();
    assert_eq!(nav.location.path, "/login");
}

#[tokio::test]
async fn test_invalid_registration_is_not_sent() {
    let backend = MockBackend::start().await;
    let (ctx, _store) = context(&backend, 1_000);

    let request = RegisterRequest {
        username: "mia".into(),
        email: "not-an-email".into(),
        password: "secret-password".into(),
        role: Role::Parent,
        language: "en".into(),
    };
    let err = ctx.auth.register(&request).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_registration_posts_without_token() {
    let backend = MockBackend::start().await;
    backend.respond("POST", "/auth/register", 200, json!({"id": 7, "username": "mia"}));
    let (ctx, _store) = context(&backend, 1_000);

    let request = RegisterRequest {
        username: "mia".into(),
        email: "mia@example.org".into(),
        password: "secret-password".into(),
        role: Role::Teacher,
        language: "de".into(),
    };
    let created = ctx.auth.register(&request).await.unwrap();

    assert_eq!(created["id"], 7);
    let sent = &backend.requests_to("/auth/register")[0];
    assert_eq!(sent.authorization, None);
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(body["role"], "teacher");
}

#[tokio::test]
async fn test_announcements_query_repeats_class_ids() {
    let backend = MockBackend::start().await;
    backend.respond(
        "GET",
        "/announcements",
        200,
        json!([{"id": 1, "title": "Trip", "content_fr": "Sortie"}]),
    );
    let (ctx, store) = context(&backend, 1_000);
    store.set(&token("teacher", None)).await.unwrap();

    let list = ctx.announcements.for_classes(&[1, 2]).await.unwrap();

    assert_eq!(list[0].content.as_deref(), Some("Sortie"));
    let sent = &backend.requests_to("/announcements")[0];
    assert_eq!(sent.query.as_deref(), Some("class_ids=1&class_ids=2"));
}

#[tokio::test]
async fn test_announcements_for_no_classes_makes_no_request() {
    let backend = MockBackend::start().await;
    let (ctx, _store) = context(&backend, 1_000);

    let list = ctx.announcements.for_classes(&[]).await.unwrap();

    assert!(list.is_empty());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_create_announcement_requires_content() {
    let backend = MockBackend::start().await;
    let (ctx, _store) = context(&backend, 1_000);

    let request = CreateAnnouncementRequest {
        title: "Trip".into(),
        content_en: None,
        content_de: None,
        content_fr: None,
        original_language: "en".into(),
        target_audience: TargetAudience::Parents,
        class_id: 1,
        recipients: vec![],
    };
    let err = ctx.announcements.create(&request).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_class_detail() {
    let backend = MockBackend::start().await;
    backend.respond("GET", "/classes/4", 200, json!({"id": 4, "class_name": "4b", "school_id": 1}));
    let (ctx, store) = context(&backend, 1_000);
    store.set(&token("admin", None)).await.unwrap();

    let class = ctx.classes.get(4).await.unwrap();
    assert_eq!(class.label(), "4b");
}
