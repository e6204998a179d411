//! Database connection settings.
//!
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://evently.db?mode=rwc`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)

use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://evently.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
        }
    }
}
