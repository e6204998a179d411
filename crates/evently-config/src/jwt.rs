use std::env;

use thiserror::Error;

use crate::duration::parse_duration_secs;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900; // 15 minutes
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800; // 7 days

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_default(),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| parse_duration_secs(&s))
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| parse_duration_secs(&s))
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY),
        }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }

    /// The server refuses to start without a signing secret.
    pub fn require_secret(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_lifetimes() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
    }

    #[test]
    fn test_require_secret() {
        assert!(JwtConfig::new("secret").require_secret().is_ok());
        assert_eq!(
            JwtConfig::new("  ").require_secret(),
            Err(ConfigError::MissingSecret)
        );
    }
}
