//! Which requests carry a bearer token, and how long to wait for one.

use std::time::Duration;

use schoolhub_core::config::ApiConfig;

/// Token attachment rules for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Path prefixes sent without authentication.
    public_endpoints: Vec<String>,
    /// Upper bound on waiting for a token to appear.
    token_wait: Duration,
}

impl AuthPolicy {
    /// Create a policy from explicit values.
    pub fn new(public_endpoints: Vec<String>, token_wait: Duration) -> Self {
        Self {
            public_endpoints,
            token_wait,
        }
    }

    /// Policy described by the API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.public_endpoints.clone(), config.token_wait())
    }

    /// Whether `path` is on the unauthenticated allow-list.
    pub fn is_public(&self, path: &str) -> bool {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self.public_endpoints
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// How long a request may wait for a token.
    pub fn token_wait(&self) -> Duration {
        self.token_wait
    }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}
