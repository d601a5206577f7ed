//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub bind_addr: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub db_path: String,

    /// Pool size
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            bind_addr: parse_or(&lookup, "STOCKROOM_BIND_ADDR", "0.0.0.0")?,
            port: parse_or(&lookup, "STOCKROOM_PORT", "8080")?,
            db_path: lookup("STOCKROOM_DB_PATH").unwrap_or_else(|| "./stockroom.db".to_string()),
            db_max_connections: parse_or(&lookup, "STOCKROOM_DB_MAX_CONNECTIONS", "5")?,
        };

        if config.db_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("STOCKROOM_DB_PATH".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
