//! Environment-driven configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Optional admin account seeded at startup, only into an empty user table.
#[derive(Debug, Clone)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing key. Must be at least 32 bytes; shorter keys abort
    /// startup when the token service is constructed.
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Postgres connection string. Absent means the in-memory store
    /// (dev/test only; nothing survives a restart).
    pub database_url: Option<String>,
    pub bootstrap_admin: Option<BootstrapUser>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("DATABASE_URL").ok();

        let bootstrap_admin = match (
            std::env::var("ADMIN_USERNAME").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(BootstrapUser { username, password }),
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_USERNAME")),
            (None, None) => None,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            database_url,
            bootstrap_admin,
        })
    }
}
