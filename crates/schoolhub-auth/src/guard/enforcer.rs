//! Route guard: admits or redirects a single navigation attempt.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::SessionProvider;
use schoolhub_core::types::{ClearReason, Role};

use super::routes::{LOGIN_PATH, RouteDescriptor};

/// States a navigation attempt passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// The guard is reading the session.
    Evaluating,
    /// The target was entered.
    Admitted,
    /// The user was sent to the login view.
    RedirectedToLogin,
    /// The user was sent to their role's dashboard.
    RedirectedToRoleHome,
}

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum NavigationDecision {
    /// Enter the requested route.
    Admitted,
    /// Go to the login view instead.
    RedirectedToLogin,
    /// Go to `role`'s home route instead.
    RedirectedToRoleHome {
        /// The session's role.
        role: Role,
    },
}

impl NavigationDecision {
    /// The terminal state this decision represents.
    pub fn state(&self) -> GuardState {
        match self {
            Self::Admitted => GuardState::Admitted,
            Self::RedirectedToLogin => GuardState::RedirectedToLogin,
            Self::RedirectedToRoleHome { .. } => GuardState::RedirectedToRoleHome,
        }
    }

    /// Where the navigation must go instead, if anywhere.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::Admitted => None,
            Self::RedirectedToLogin => Some(LOGIN_PATH),
            Self::RedirectedToRoleHome { role } => Some(role.home_path()),
        }
    }
}

/// Decides, per navigation, whether the session may enter a route.
///
/// The role gate is a convenience for the user. It is derived from an
/// unverified token payload and protects nothing; the backend authorizes
/// every request itself.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionProvider>,
}

impl RouteGuard {
    /// Create a guard reading from `session`.
    pub fn new(session: Arc<dyn SessionProvider>) -> Self {
        Self { session }
    }

    /// Evaluate one navigation to `target`.
    ///
    /// A session whose role has no home route is cleared before being sent
    /// to the login view.
    pub async fn evaluate(&self, target: &RouteDescriptor) -> AppResult<NavigationDecision> {
        debug!(route = %target.name, state = ?GuardState::Evaluating, "Guarding navigation");

        if !target.requires_auth {
            return Ok(NavigationDecision::Admitted);
        }

        let session = self.session.get().await?;
        if !session.is_authenticated() {
            warn!(route = %target.name, "No token found. Redirecting to login.");
            return Ok(NavigationDecision::RedirectedToLogin);
        }

        let role = session.known_role();
        if target.admits(role) {
            return Ok(NavigationDecision::Admitted);
        }

        match role {
            Some(role) => {
                warn!(route = %target.name, %role, "Role not allowed. Redirecting to role home.");
                Ok(NavigationDecision::RedirectedToRoleHome { role })
            }
            None => {
                error!(
                    route = %target.name,
                    role = session.role.as_deref().unwrap_or(""),
                    "Unknown role encountered. Redirecting to login."
                );
                self.session.invalidate(ClearReason::UnsupportedRole).await?;
                Ok(NavigationDecision::RedirectedToLogin)
            }
        }
    }
}
