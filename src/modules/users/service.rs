use anyhow::{Context, anyhow};
use sqlx::SqlitePool;
use tracing::{info, instrument};

use evently_auth::Role;
use evently_core::{AppError, PaginationParams};
use evently_db::delete_all_for_user_on;
use evently_models::User;

use crate::state::AppState;

const SELECT_USER: &str = "SELECT id, email, password_hash, role, created_at FROM users";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &SqlitePool, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(user_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn list_users(
        db: &SqlitePool,
        params: &PaginationParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        let users = sqlx::query_as::<_, User>(&format!(
            "{} ORDER BY id ASC LIMIT ? OFFSET ?",
            SELECT_USER
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok((users, total))
    }

    /// Changes a user's role and revokes their refresh tokens in one
    /// transaction, so the next access token they obtain carries the new role.
    /// If either step fails neither is applied.
    #[instrument(skip(state))]
    pub async fn update_role(
        state: &AppState,
        requester_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<User, AppError> {
        if requester_id == user_id && role != Role::Admin {
            return Err(AppError::bad_request(anyhow!(
                "You cannot remove your own admin role"
            )));
        }

        let mut tx = state
            .db
            .begin()
            .await
            .context("Failed to begin role update")
            .map_err(AppError::database)?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = ? WHERE id = ? RETURNING id, email, password_hash, role, created_at",
        )
        .bind(role)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to update user role")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let revoked = delete_all_for_user_on(&mut *tx, user_id)
            .await
            .context("Failed to revoke refresh tokens")
            .map_err(AppError::database)?;

        tx.commit()
            .await
            .context("Failed to commit role update")
            .map_err(AppError::database)?;

        info!(user_id, role = %role, revoked, "user role changed");
        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(
        db: &SqlitePool,
        requester_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        if requester_id == user_id {
            return Err(AppError::bad_request(anyhow!(
                "You cannot delete your own account"
            )));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user_id, "user deleted");
        Ok(())
    }
}
