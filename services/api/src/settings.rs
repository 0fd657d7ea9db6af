//! Server settings
//!
//! Built-in defaults overridden by `FOODL_*` environment variables, e.g.
//! `FOODL_PORT=8080` or `FOODL_STORAGE=memory`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Which repositories back the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Upper bound on restaurants returned by `GET /api/restaurant/:code`
    pub sample_size: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("storage", "postgres")?
            .set_default("sample_size", 5)?
            .add_source(Environment::with_prefix("FOODL").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
