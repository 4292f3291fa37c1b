//! Login, registration and logout.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use validator::Validate;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::types::{ClearReason, Role, Session};

use crate::dto::{RegisterRequest, TokenResponse};
use crate::gateway::RequestGateway;

/// Token endpoint.
pub const TOKEN_PATH: &str = "/token";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/auth/register";

/// Authentication flows against the backend.
#[derive(Debug, Clone)]
pub struct AuthApi {
    gateway: Arc<RequestGateway>,
}

impl AuthApi {
    /// Creates a new auth API.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let form = [
            ("username", username),
            ("password", password),
            ("grant_type", "password"),
        ];
        let response: TokenResponse = self.gateway.post_form(TOKEN_PATH, &form).await?;
        let session = self.gateway.session().set(&response.access_token).await?;

        info!(username, role = ?session.role, "Logged in");
        Ok(session)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Value> {
        request.validate()?;
        let created: Value = self.gateway.post_json(REGISTER_PATH, request).await?;
        info!(username = %request.username, role = %request.role, "Registered account");
        Ok(created)
    }

    /// Clear the session.
    pub async fn logout(&self) -> AppResult<()> {
        self.gateway.session().clear().await
    }

    /// The dashboard path for `session`'s role.
    ///
    /// A role this client does not serve clears the session and fails with
    /// an authorization error naming it.
    pub async fn landing_route(&self, session: &Session) -> AppResult<&'static str> {
        let raw = session.role.as_deref().unwrap_or_default();
        match raw.parse::<Role>() {
            Ok(role) => Ok(role.home_path()),
            Err(e) => {
                warn!(role = raw, "Unsupported role after login");
                self.gateway
                    .session()
                    .invalidate(ClearReason::UnsupportedRole)
                    .await?;
                Err(e)
            }
        }
    }
}
