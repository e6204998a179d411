//! Opaque refresh tokens.
//!
//! A refresh token is 32 bytes from the operating system's CSPRNG,
//! hex-encoded. Only its SHA-256 digest is persisted, so a leaked database
//! does not yield usable tokens.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

use crate::jwt::TokenError;

pub const REFRESH_TOKEN_BYTES: usize = 32;

pub fn generate_refresh_token() -> Result<String, TokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::Entropy(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// SHA-256 hex digest used as the storage key for a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
