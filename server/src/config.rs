//! Server configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default SQLite database file.
pub const DEFAULT_DATABASE_URL: &str = "recipes.db";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Path (or URL) of the SQLite database.
    pub database_url: String,
    /// Socket address to listen on.
    pub bind_addr: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `DATABASE_URL`: SQLite database path (default: "recipes.db")
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `DB_POOL_SIZE`: pooled connections, at least 1 (default: 8)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DB_POOL_SIZE".to_string(),
                        value,
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
        })
    }
}
