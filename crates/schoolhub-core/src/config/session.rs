//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the session record is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend for the session keys.
    #[serde(default)]
    pub backend: SessionBackend,
    /// Path of the JSON document used by the file backend.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: default_path(),
        }
    }
}

/// Key-value substrate backing the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// Process-local map; the session is lost on exit.
    Memory,
    /// JSON document on disk; the session survives between runs.
    File,
}

impl Default for SessionBackend {
    fn default() -> Self {
        Self::File
    }
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionBackend::Memory => write!(f, "memory"),
            SessionBackend::File => write!(f, "file"),
        }
    }
}

fn default_path() -> String {
    "data/session.json".to_string()
}
