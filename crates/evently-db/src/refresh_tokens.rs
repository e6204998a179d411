//! Persistent refresh tokens with rotation.
//!
//! Clients hold the raw token; the table holds its SHA-256 digest. A token is
//! single-use: [`RefreshTokenStore::rotate`] deletes the presented row and
//! inserts its replacement in one transaction. When two requests race with
//! the same token, the database serializes the deletes and the loser sees
//! zero affected rows, which surfaces as [`RefreshTokenError::Invalid`].
//!
//! Expired rows are rejected when presented and removed by
//! [`RefreshTokenStore::delete_expired`].

use chrono::{DateTime, Duration, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::instrument;

use evently_auth::{TokenError, TokenIssuer, hash_refresh_token};
use evently_models::User;

#[derive(Debug, Error)]
pub enum RefreshTokenError {
    /// Unknown, already consumed, or revoked.
    #[error("invalid refresh token")]
    Invalid,
    #[error("refresh token expired")]
    Expired,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Deletes every refresh token of `user_id` on `conn`. Pass a transaction to
/// revoke together with another change, such as a role update.
pub async fn delete_all_for_user_on(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

const SELECT_USER_BY_ID: &str = "SELECT id, email, password_hash, role, created_at FROM users WHERE id = ?";

#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    db: SqlitePool,
    issuer: TokenIssuer,
    ttl: Duration,
}

impl RefreshTokenStore {
    pub fn new(db: SqlitePool, issuer: TokenIssuer) -> Self {
        let ttl = Duration::seconds(issuer.refresh_token_expiry());
        Self { db, issuer, ttl }
    }

    /// Generates a fresh token for `user_id`, persists it, and returns the raw value.
    #[instrument(skip(self))]
    pub async fn issue(&self, user_id: i64) -> Result<String, RefreshTokenError> {
        let token = self.issuer.issue_refresh_token()?;
        self.save(user_id, &token).await?;
        Ok(token)
    }

    #[instrument(skip(self, token))]
    pub async fn save(&self, user_id: i64, token: &str) -> Result<(), RefreshTokenError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO refresh_tokens (token_hash, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(hash_refresh_token(token))
        .bind(user_id)
        .bind(now + self.ttl)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Looks up the owner of `token` without consuming it.
    #[instrument(skip(self, token))]
    pub async fn validate_and_fetch_user(&self, token: &str) -> Result<User, RefreshTokenError> {
        let row: Option<(i64, DateTime<Utc>)> =
            sqlx::query_as("SELECT user_id, expires_at FROM refresh_tokens WHERE token_hash = ?")
                .bind(hash_refresh_token(token))
                .fetch_optional(&self.db)
                .await?;

        let (user_id, expires_at) = row.ok_or(RefreshTokenError::Invalid)?;
        if expires_at <= Utc::now() {
            return Err(RefreshTokenError::Expired);
        }

        sqlx::query_as::<_, User>(SELECT_USER_BY_ID)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(RefreshTokenError::Invalid)
    }

    /// Consumes `old_token` and returns its owner with a replacement token.
    ///
    /// An expired token is still deleted before [`RefreshTokenError::Expired`]
    /// is returned.
    #[instrument(skip(self, old_token))]
    pub async fn rotate(&self, old_token: &str) -> Result<(User, String), RefreshTokenError> {
        let mut tx = self.db.begin().await?;

        let deleted: Option<(i64, DateTime<Utc>)> = sqlx::query_as(
            "DELETE FROM refresh_tokens WHERE token_hash = ? RETURNING user_id, expires_at",
        )
        .bind(hash_refresh_token(old_token))
        .fetch_optional(&mut *tx)
        .await?;

        let Some((user_id, expires_at)) = deleted else {
            tx.rollback().await?;
            return Err(RefreshTokenError::Invalid);
        };

        let now = Utc::now();
        if expires_at <= now {
            tx.commit().await?;
            return Err(RefreshTokenError::Expired);
        }

        let Some(user) = sqlx::query_as::<_, User>(SELECT_USER_BY_ID)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.commit().await?;
            return Err(RefreshTokenError::Invalid);
        };

        let new_token = self.issuer.issue_refresh_token()?;
        sqlx::query(
            "INSERT INTO refresh_tokens (token_hash, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(hash_refresh_token(&new_token))
        .bind(user.id)
        .bind(now + self.ttl)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, new_token))
    }

    /// Revokes a single token. Absent tokens are not an error.
    #[instrument(skip(self, token))]
    pub async fn delete_one(&self, token: &str) -> Result<(), RefreshTokenError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(hash_refresh_token(token))
            .execute(&self.db)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all_for_user(&self, user_id: i64) -> Result<u64, RefreshTokenError> {
        let mut conn = self.db.acquire().await?;
        Ok(delete_all_for_user_on(&mut conn, user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_expired(&self) -> Result<u64, RefreshTokenError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
