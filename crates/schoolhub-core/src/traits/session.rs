//! Session provider trait consumed by the gateway and the route guard.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::result::AppResult;
use crate::types::{ClearReason, Session, SessionEvent};

/// Single owner of the session record.
///
/// Components never touch the key-value substrate directly; they go
/// through this trait so every read and write of the session has one
/// implementation to reason about.
#[async_trait]
pub trait SessionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Read the current token, role and display name. No side effects.
    async fn get(&self) -> AppResult<Session>;

    /// Wait until a token is present or `timeout` elapses.
    ///
    /// Fails with a [`Timeout`](crate::error::ErrorKind::Timeout) error when
    /// no token appears in time. Cancels nothing but the caller's own wait.
    async fn await_token(&self, timeout: Duration) -> AppResult<String>;

    /// Decode the token's claims and persist token, role and display name.
    async fn set(&self, token: &str) -> AppResult<Session>;

    /// Remove all session keys, recording why.
    async fn invalidate(&self, reason: ClearReason) -> AppResult<()>;

    /// Remove all session keys after an explicit logout.
    async fn clear(&self) -> AppResult<()> {
        self.invalidate(ClearReason::Logout).await
    }

    /// Subscribe to establish/clear notifications.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
