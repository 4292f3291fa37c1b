//! The session store: single owner of the persisted session keys.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{KeyValueStore, SessionProvider};
use schoolhub_core::types::{ClearReason, Session, SessionEvent};

use crate::claims::decode_claims;

/// Substrate key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";
/// Substrate key holding the role claim.
pub const ROLE_KEY: &str = "role";
/// Substrate key holding the display name.
pub const DISPLAY_NAME_KEY: &str = "first_name";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, DISPLAY_NAME_KEY];

/// Capacity of the event channel; slow subscribers see `Lagged`.
const EVENT_CAPACITY: usize = 16;

/// Session store over an injectable key-value substrate.
///
/// Token writes are mirrored into a `watch` channel so that callers of
/// [`await_token`](SessionProvider::await_token) wake on the write instead
/// of polling the substrate. Writes made through a different store over
/// the same substrate (another process sharing the session file) do not
/// reach the channel; a waiter sees them only on its initial read or on
/// the final re-read when the timeout fires.
#[derive(Debug)]
pub struct SessionStore {
    substrate: Arc<dyn KeyValueStore>,
    token_tx: watch::Sender<Option<String>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create a store over `substrate`.
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        let (token_tx, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            substrate,
            token_tx,
            events,
        }
    }

    async fn read_token(&self) -> AppResult<Option<String>> {
        self.substrate.get(TOKEN_KEY).await
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl SessionProvider for SessionStore {
    async fn get(&self) -> AppResult<Session> {
        Ok(Session {
            token: self.substrate.get(TOKEN_KEY).await?,
            role: self.substrate.get(ROLE_KEY).await?,
            display_name: self.substrate.get(DISPLAY_NAME_KEY).await?,
        })
    }

    async fn await_token(&self, timeout: Duration) -> AppResult<String> {
        // Subscribe before reading so a write landing in between is not missed.
        let mut rx = self.token_tx.subscribe();

        if let Some(token) = self.read_token().await? {
            return Ok(token);
        }

        debug!(timeout_ms = timeout.as_millis() as u64, "Waiting for token");

        let waited = tokio::time::timeout(timeout, async {
            rx.wait_for(Option::is_some)
                .await
                .map(|token| token.clone().unwrap_or_default())
        })
        .await;

        match waited {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(_)) => Err(AppError::internal("Session store token channel closed")),
            Err(_) => match self.read_token().await? {
                // Another process sharing the substrate may have written it.
                Some(token) => Ok(token),
                None => Err(AppError::timeout("Token not found within timeout.")),
            },
        }
    }

    async fn set(&self, token: &str) -> AppResult<Session> {
        let claims = decode_claims(token)?;
        let display_name = claims.display_name().to_string();

        self.substrate
            .set_many(&[
                (TOKEN_KEY, token),
                (ROLE_KEY, claims.role.as_str()),
                (DISPLAY_NAME_KEY, display_name.as_str()),
            ])
            .await?;

        self.token_tx.send_replace(Some(token.to_string()));
        info!(role = %claims.role, "Session established");
        self.publish(SessionEvent::Established {
            role: claims.role.clone(),
        });

        Ok(Session {
            token: Some(token.to_string()),
            role: Some(claims.role),
            display_name: Some(display_name),
        })
    }

    async fn invalidate(&self, reason: ClearReason) -> AppResult<()> {
        self.substrate.remove_many(&SESSION_KEYS).await?;
        self.token_tx.send_replace(None);
        info!(%reason, "Session cleared");
        self.publish(SessionEvent::Cleared { reason });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{TokenClaims, encode_unsigned};
    use crate::session::MemoryKeyValueStore;
    use schoolhub_core::error::ErrorKind;

    fn store() -> (Arc<SessionStore>, MemoryKeyValueStore) {
        let substrate = MemoryKeyValueStore::new();
        let store = Arc::new(SessionStore::new(Arc::new(substrate.clone())));
        (store, substrate)
    }

    fn token(role: &str, first_name: Option<&str>) -> String {
        encode_unsigned(&TokenClaims::new(role, first_name)).unwrap()
    }

    #[tokio::test]
    async fn test_set_persists_decoded_claims() {
        let (store, substrate) = store();
        let token = token("parent", Some("Mia"));

        let session = store.set(&token).await.unwrap();
        assert_eq!(session.role.as_deref(), Some("parent"));
        assert_eq!(session.display_name.as_deref(), Some("Mia"));

        assert_eq!(store.get().await.unwrap(), session);
        assert_eq!(
            substrate.get(TOKEN_KEY).await.unwrap().as_deref(),
            Some(token.as_str())
        );
    }

    #[tokio::test]
    async fn test_set_defaults_display_name() {
        let (store, _) = store();
        let session = store.set(&token("teacher", None)).await.unwrap();
        assert_eq!(session.display_name.as_deref(), Some("User"));
    }

    #[tokio::test]
    async fn test_malformed_token_persists_nothing() {
        let (store, substrate) = store();
        let err = store.set("not-a-token").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(substrate.is_empty());
        assert_eq!(store.get().await.unwrap(), Session::default());
    }

    #[tokio::test]
    async fn test_clear_removes_all_keys() {
        let (store, substrate) = store();
        store.set(&token("admin", Some("Kim"))).await.unwrap();
        store.clear().await.unwrap();
        assert!(substrate.is_empty());
        assert!(!store.get().await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_await_token_returns_existing_token() {
        let (store, _) = store();
        let token = token("parent", None);
        store.set(&token).await.unwrap();
        let got = store.await_token(Duration::from_millis(10)).await.unwrap();
        assert_eq!(got, token);
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_token_wakes_on_write() {
        let (store, _) = store();
        let token = token("teacher", Some("Ana"));

        let writer = {
            let store = store.clone();
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(120)).await;
                store.set(&token).await.unwrap();
            })
        };

        let started = tokio::time::Instant::now();
        let got = store.await_token(Duration::from_secs(5)).await.unwrap();
        assert_eq!(got, token);
        assert!(started.elapsed() >= Duration::from_millis(120));
        assert!(started.elapsed() < Duration::from_secs(5));
        writer.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_token_times_out_on_schedule() {
        let (store, _) = store();
        let started = tokio::time::Instant::now();

        let err = store
            .await_token(Duration::from_millis(300))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert!(started.elapsed() < Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_wait_does_not_cancel_others() {
        let (store, _) = store();
        let token = token("parent", None);

        let short = store.await_token(Duration::from_millis(50));
        let long = store.await_token(Duration::from_millis(500));
        let write = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            store.set(&token).await.unwrap();
        };

        let (short, long, ()) = tokio::join!(short, long, write);
        assert_eq!(short.unwrap_err().kind, ErrorKind::Timeout);
        assert_eq!(long.unwrap(), token);
    }

    #[tokio::test]
    async fn test_events_published() {
        let (store, _) = store();
        let mut events = store.subscribe();

        store.set(&token("admin", None)).await.unwrap();
        store.invalidate(ClearReason::Unauthorized).await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::Established {
                role: "admin".into()
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::Cleared {
                reason: ClearReason::Unauthorized
            }
        );
    }
}
