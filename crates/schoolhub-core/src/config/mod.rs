//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{SessionBackend, SessionConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Every section has defaults, so an empty configuration source yields a
/// client pointed at a local backend with a file-backed session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend origin and request gateway settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with `SCHOOLHUB__`
    /// (for example `SCHOOLHUB__API__BASE_URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SCHOOLHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("api.public_endpoints")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;
        debug!(base, env, "Configuration sources merged");

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_source() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/");
        assert_eq!(config.api.token_wait_ms, 5000);
        assert_eq!(config.api.public_endpoints, vec!["/token", "/auth/register"]);
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [api]
            base_url = "https://school.example.org/"
            token_wait_ms = 250

            [session]
            backend = "memory"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.api.base_url, "https://school.example.org/");
        assert_eq!(config.api.token_wait().as_millis(), 250);
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.session.backend, SessionBackend::Memory);
    }
}
