//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so the server runs out of the box in development and is fully
//! configurable in deployment.

use std::env;
use std::time::Duration;

use vela_db::DbConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port to listen on.
    /// Env: `PORT`, default 8080.
    pub port: u16,

    /// Path to the SQLite database file.
    /// Env: `DATABASE_PATH`, default `./data/vela.db`.
    pub database_path: String,

    /// Maximum connections in the database pool.
    /// Env: `DB_MAX_CONNECTIONS`, default 5.
    pub db_max_connections: u32,

    /// Bounded wait for the SQLite write lock, in milliseconds.
    /// Env: `DB_BUSY_TIMEOUT_MS`, default 5000.
    pub db_busy_timeout_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            port: parse_env("PORT", 8080)?,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/vela.db".to_string()),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 5)?,
            db_busy_timeout_ms: parse_env("DB_BUSY_TIMEOUT_MS", 5000)?,
        })
    }

    /// Builds the database configuration this server config describes.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .busy_timeout(Duration::from_millis(self.db_busy_timeout_ms))
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global, so everything lives in one test.
    #[test]
    fn test_load_defaults_and_overrides() {
        env::remove_var("PORT");
        env::remove_var("DATABASE_PATH");
        env::remove_var("DB_MAX_CONNECTIONS");
        env::remove_var("DB_BUSY_TIMEOUT_MS");

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./data/vela.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_busy_timeout_ms, 5000);

        env::set_var("PORT", "3000");
        env::set_var("DB_BUSY_TIMEOUT_MS", "250");
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_busy_timeout_ms, 250);

        let db = config.db_config();
        assert_eq!(db.busy_timeout, Duration::from_millis(250));

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            ServerConfig::load(),
            Err(ConfigError::InvalidValue("PORT"))
        ));

        env::remove_var("PORT");
        env::remove_var("DB_BUSY_TIMEOUT_MS");
    }
}
