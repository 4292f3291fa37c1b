//! Backend origin and request gateway configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the outbound request gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin every request path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Upper bound on how long a request waits for a token to appear.
    #[serde(default = "default_token_wait")]
    pub token_wait_ms: u64,
    /// Path prefixes sent without an `Authorization` header.
    #[serde(default = "default_public_endpoints")]
    pub public_endpoints: Vec<String>,
}

impl ApiConfig {
    /// The token wait bound as a `Duration`.
    pub fn token_wait(&self) -> Duration {
        Duration::from_millis(self.token_wait_ms)
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            token_wait_ms: default_token_wait(),
            public_endpoints: default_public_endpoints(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_token_wait() -> u64 {
    5000
}

fn default_public_endpoints() -> Vec<String> {
    vec!["/token".to_string(), "/auth/register".to_string()]
}
