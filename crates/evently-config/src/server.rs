use std::env;

use crate::duration::parse_duration_secs;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds between expired refresh token sweeps. `0` disables the sweep.
    pub refresh_token_sweep_interval: u64,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            refresh_token_sweep_interval: env::var("REFRESH_TOKEN_SWEEP_INTERVAL")
                .ok()
                .and_then(|s| parse_duration_secs(&s))
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(3600),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
