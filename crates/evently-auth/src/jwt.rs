//! Access token issuing and verification.
//!
//! Access tokens are HS256 JWTs carrying the caller's email, user id and
//! role. They are stateless: a token stays valid until it expires, and
//! verification never touches the database.
//!
//! Verification only accepts HS256. Tokens whose header names any other
//! algorithm (`none`, `HS512`, `RS256`, ...) are rejected as invalid, and no
//! clock leeway is granted on `exp`.
//!
//! # Example
//!
//! ```ignore
//! use evently_auth::{Role, TokenIssuer, TokenError};
//!
//! let issuer = TokenIssuer::new(jwt_config);
//! let token = issuer.issue_access_token("admin@example.com", 1, Role::Admin)?;
//!
//! match issuer.verify_access_token(&token) {
//!     Ok(claims) => println!("user {} ({})", claims.user_id, claims.role),
//!     Err(TokenError::Expired) => println!("log in again"),
//!     Err(e) => println!("rejected: {}", e),
//! }
//! ```

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use thiserror::Error;

use evently_config::JwtConfig;

use crate::claims::Claims;
use crate::refresh::generate_refresh_token;
use crate::role::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be signed (missing secret or encoder failure).
    #[error("failed to sign token: {0}")]
    Signing(String),
    /// Signature and claims are fine but `exp` is in the past.
    #[error("token expired")]
    Expired,
    /// Bad signature, unexpected algorithm, or malformed/missing claims.
    #[error("invalid token")]
    Invalid,
    /// The operating system's random number generator failed.
    #[error("failed to gather entropy: {0}")]
    Entropy(String),
}

/// Signs and verifies access tokens and mints refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_token_expiry", &self.config.access_token_expiry)
            .field("refresh_token_expiry", &self.config.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Refresh token lifetime in seconds.
    pub fn refresh_token_expiry(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    pub fn issue_access_token(
        &self,
        email: &str,
        user_id: i64,
        role: Role,
    ) -> Result<String, TokenError> {
        if self.config.secret.is_empty() {
            return Err(TokenError::Signing("signing secret is empty".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            user_id,
            role,
            exp: now + self.config.access_token_expiry,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        if self.config.secret.is_empty() {
            return Err(TokenError::Invalid);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    pub fn issue_refresh_token(&self) -> Result<String, TokenError> {
        generate_refresh_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(get_test_jwt_config());
        let token = issuer
            .issue_access_token("test@example.com", 42, Role::Admin)
            .unwrap();

        let claims = issuer.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig {
            access_token_expiry: -60,
            ..get_test_jwt_config()
        };
        let issuer = TokenIssuer::new(config);
        let token = issuer
            .issue_access_token("test@example.com", 1, Role::User)
            .unwrap();

        assert_eq!(issuer.verify_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = TokenIssuer::new(get_test_jwt_config());
        let token = issuer
            .issue_access_token("test@example.com", 1, Role::User)
            .unwrap();

        let other = TokenIssuer::new(JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        });
        assert_eq!(other.verify_access_token(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let issuer = TokenIssuer::new(get_test_jwt_config());
        assert_eq!(
            issuer.verify_access_token("not.a.token"),
            Err(TokenError::Invalid)
        );
        assert_eq!(issuer.verify_access_token(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_empty_secret_cannot_sign() {
        let issuer = TokenIssuer::new(JwtConfig::new(""));
        assert!(matches!(
            issuer.issue_access_token("test@example.com", 1, Role::User),
            Err(TokenError::Signing(_))
        ));
    }

    #[test]
    fn test_refresh_token_is_hex() {
        let issuer = TokenIssuer::new(get_test_jwt_config());
        let token = issuer.issue_refresh_token().unwrap();
        assert_eq!(token.len(), 64);
    }
}
