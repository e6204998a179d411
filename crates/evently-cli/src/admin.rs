//! Account administration: creating admins and changing roles.
//!
//! These are the only ways to grant the admin role outside the admin API.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use validator::Validate;

use evently_auth::Role;
use evently_core::hash_password;
use evently_db::delete_all_for_user_on;
use evently_models::{SignupRequest, User};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("invalid account details: {0}")]
    Validation(String),
    #[error("a user with email {0} already exists")]
    EmailTaken(String),
    #[error("no user with email {0}")]
    UserNotFound(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at";

pub async fn create_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<User, AdminError> {
    let request = SignupRequest {
        email: email.trim().to_lowercase(),
        password: password.to_string(),
    };
    request
        .validate()
        .map_err(|e| AdminError::Validation(e.to_string()))?;

    let password_hash = hash_password(&request.password).map_err(|e| AdminError::Hash(e.to_string()))?;

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password_hash, role, created_at) VALUES (?, ?, ?, ?) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&request.email)
    .bind(&password_hash)
    .bind(Role::Admin)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AdminError::EmailTaken(request.email.clone())
        }
        _ => AdminError::Database(e),
    })
}

/// Sets `role` on the user with `email` and revokes all of their refresh
/// tokens. Returns the updated user and the number of revoked tokens.
pub async fn set_role(
    pool: &SqlitePool,
    email: &str,
    role: Role,
) -> Result<(User, u64), AdminError> {
    let email = email.trim().to_lowercase();
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET role = ? WHERE email = ? RETURNING {}",
        USER_COLUMNS
    ))
    .bind(role)
    .bind(&email)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AdminError::UserNotFound(email.clone()))?;

    let revoked = delete_all_for_user_on(&mut *tx, user.id).await?;

    tx.commit().await?;

    Ok((user, revoked))
}
