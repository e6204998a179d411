//! Password hashing with bcrypt.
//!
//! Every hash carries its own random salt, so hashing the same password twice
//! yields different strings that both verify. The work factor defaults to
//! [`bcrypt::DEFAULT_COST`] and can be lowered with `BCRYPT_COST` (useful for
//! tests and seeding).

use std::sync::LazyLock;

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::error;

use crate::errors::AppError;

/// Used only if hashing the dummy at the configured cost fails.
const FALLBACK_DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("evently-dummy-password").unwrap_or_else(|e| {
        error!(error = %e, "Failed to build dummy password hash");
        FALLBACK_DUMMY_HASH.to_string()
    })
});

/// Work factor for new hashes: `BCRYPT_COST` clamped to 4..=31, else [`DEFAULT_COST`].
pub fn bcrypt_cost() -> u32 {
    std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .map(|cost| cost.clamp(4, 31))
        .unwrap_or(DEFAULT_COST)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, bcrypt_cost())
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Returns `false` on mismatch and on a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// A hash at the configured cost that no real password matches. Verifying
/// against it costs as much as verifying a real account's hash, so a login
/// for an unknown email takes as long as a wrong password.
///
/// Built on first use; call once at start-up to keep that off a request.
pub fn dummy_password_hash() -> &'static str {
    DUMMY_HASH.as_str()
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_async(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(anyhow!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking thread pool. A panicked task counts as a mismatch.
pub async fn verify_password_async(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret123").unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
        assert!(!verify_password("secret123", ""));
    }

    fn cost_of(hash: &str) -> Option<u32> {
        hash.split('$').nth(2).and_then(|c| c.parse().ok())
    }

    #[test]
    fn test_dummy_hash_matches_configured_cost() {
        let dummy = dummy_password_hash();
        assert_eq!(cost_of(dummy), Some(bcrypt_cost()));
        assert_eq!(cost_of(dummy), cost_of(&hash_password("secret123").unwrap()));
        assert!(!verify_password("secret123", dummy));
    }

    #[tokio::test]
    async fn test_async_variants() {
        let hash = hash_password_async("secret123".to_string()).await.unwrap();
        assert!(verify_password_async("secret123".to_string(), hash.clone()).await);
        assert!(!verify_password_async("nope".to_string(), hash).await);
    }
}
