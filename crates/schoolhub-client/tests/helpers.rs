//! Shared test helpers: an in-process stand-in for the SchoolHub backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use serde_json::{Value, json};

use schoolhub_auth::claims::{TokenClaims, encode_unsigned};
use schoolhub_auth::session::{MemoryKeyValueStore, SessionStore};
use schoolhub_client::ClientContext;
use schoolhub_core::config::AppConfig;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

#[derive(Debug, Clone, Default)]
struct MockState {
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend stand-in listening on an ephemeral local port.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    /// Start the server.
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    /// Answer `method path` with `status` and `body` from now on.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_after(method, path, Duration::ZERO, status, body);
    }

    /// Like [`respond`](Self::respond), but hold the answer for `delay`.
    pub fn respond_after(
        &self,
        method: &str,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) {
        self.state.responses.lock().unwrap().insert(
            format!("{method} {path}"),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body,
                delay,
            },
        );
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests received for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let key = format!("{} {}", method, uri.path());
    let canned = state.responses.lock().unwrap().get(&key).cloned();
    match canned {
        Some(canned) => {
            tokio::time::sleep(canned.delay).await;
            (canned.status, Json(canned.body))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))),
    }
}

/// An unsigned token carrying `role` and `first_name`.
pub fn token(role: &str, first_name: Option<&str>) -> String {
    encode_unsigned(&TokenClaims::new(role, first_name)).unwrap()
}

/// A client context pointed at `backend` with an in-memory session.
pub fn context(backend: &MockBackend, token_wait_ms: u64) -> (ClientContext, Arc<SessionStore>) {
    context_with_timeout(backend, token_wait_ms, 5)
}

/// Like [`context`], with an explicit per-request timeout.
pub fn context_with_timeout(
    backend: &MockBackend,
    token_wait_ms: u64,
    request_timeout_seconds: u64,
) -> (ClientContext, Arc<SessionStore>) {
    let mut config = AppConfig::default();
    config.api.base_url = backend.base_url.clone();
    config.api.token_wait_ms = token_wait_ms;
    config.api.request_timeout_seconds = request_timeout_seconds;

    let store = Arc::new(SessionStore::new(Arc::new(MemoryKeyValueStore::new())));
    let ctx = ClientContext::with_session(config, store.clone()).unwrap();
    (ctx, store)
}
