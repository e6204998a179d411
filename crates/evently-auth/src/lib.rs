//! # Evently Auth
//!
//! Authentication primitives for the Evently API.
//!
//! - [`claims`]: access token claims
//! - [`role`]: the user role carried in claims and stored on users
//! - [`jwt`]: [`TokenIssuer`], which signs and verifies HS256 access tokens
//! - [`refresh`]: opaque refresh token generation and hashing
//!
//! # Example
//!
//! ```ignore
//! use evently_auth::{Role, TokenIssuer};
//! use evently_config::JwtConfig;
//!
//! let issuer = TokenIssuer::new(JwtConfig::from_env());
//!
//! let token = issuer.issue_access_token("user@example.com", 42, Role::User)?;
//! let claims = issuer.verify_access_token(&token)?;
//! assert_eq!(claims.user_id, 42);
//!
//! let refresh_token = issuer.issue_refresh_token()?;
//! ```

pub mod claims;
pub mod jwt;
pub mod refresh;
pub mod role;

pub use claims::Claims;
pub use jwt::{TokenError, TokenIssuer};
pub use refresh::{generate_refresh_token, hash_refresh_token};
pub use role::Role;
