//! Claims payload carried in the middle segment of a bearer token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use schoolhub_core::types::Role;

/// Display name used when the token carries no usable `first_name`.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Claims the client reads from an access token.
///
/// Unknown claims (`sub`, `exp`, ...) are preserved in [`extra`](Self::extra)
/// but never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Role as issued by the backend.
    pub role: String,
    /// Given name of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Every other claim, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Claims with just a role and a first name.
    pub fn new(role: impl Into<String>, first_name: Option<&str>) -> Self {
        Self {
            role: role.into(),
            first_name: first_name.map(String::from),
            extra: Map::new(),
        }
    }

    /// The name to greet the user with.
    pub fn display_name(&self) -> &str {
        match self.first_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DISPLAY_NAME,
        }
    }

    /// The role parsed into the closed enumeration, if it maps to one.
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}
