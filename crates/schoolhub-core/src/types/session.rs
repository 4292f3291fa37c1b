//! The logical session record and its change notifications.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Token, role and display name as currently persisted.
///
/// The role is kept as the raw string found in the token claims. It is a
/// convenience for navigation and personalization only; the backend makes
/// every access decision on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: Option<String>,
    /// Role claim as issued.
    pub role: Option<String>,
    /// Name shown in greetings.
    pub display_name: Option<String>,
}

impl Session {
    /// Whether a bearer token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The role parsed into the closed enumeration, if it maps to one.
    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Why a session was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    /// The user logged out.
    Logout,
    /// The backend rejected a request with HTTP 401.
    Unauthorized,
    /// The session's role has no home route in this client.
    UnsupportedRole,
}

impl std::fmt::Display for ClearReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClearReason::Logout => write!(f, "logout"),
            ClearReason::Unauthorized => write!(f, "unauthorized"),
            ClearReason::UnsupportedRole => write!(f, "unsupported_role"),
        }
    }
}

/// Change notifications published by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A token was stored.
    Established {
        /// Role claim of the new token.
        role: String,
    },
    /// All session keys were removed.
    Cleared {
        /// What triggered the removal.
        reason: ClearReason,
    },
}
