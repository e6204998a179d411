use anyhow::{Context, anyhow};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use evently_core::AppError;
use evently_models::{Registration, RegistrationWithUser};

pub struct RegistrationService;

impl RegistrationService {
    async fn ensure_event_exists(db: &SqlitePool, event_id: i64) -> Result<(), AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_one(db)
            .await
            .context("Failed to check event existence")
            .map_err(AppError::database)?;

        if count == 0 {
            return Err(AppError::not_found(anyhow!("event not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn register(
        db: &SqlitePool,
        event_id: i64,
        user_id: i64,
    ) -> Result<Registration, AppError> {
        Self::ensure_event_exists(db, event_id).await?;

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, user_id, created_at)
            VALUES (?, ?, ?)
            RETURNING id, event_id, user_id, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("you are already registered for this event");
                }
            }
            AppError::database(anyhow::Error::from(e).context("Failed to register for event"))
        })?;

        info!(registration_id = registration.id, "registered for event");
        Ok(registration)
    }

    #[instrument(skip(db))]
    pub async fn cancel(db: &SqlitePool, event_id: i64, user_id: i64) -> Result<(), AppError> {
        Self::ensure_event_exists(db, event_id).await?;

        let result = sqlx::query("DELETE FROM registrations WHERE event_id = ? AND user_id = ?")
            .bind(event_id)
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to cancel registration")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::bad_request(anyhow!(
                "you are not registered for this event"
            )));
        }

        info!("registration cancelled");
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn list_for_event(
        db: &SqlitePool,
        event_id: i64,
    ) -> Result<Vec<RegistrationWithUser>, AppError> {
        sqlx::query_as::<_, RegistrationWithUser>(
            r#"
            SELECT r.id, r.event_id, r.user_id, u.email, r.created_at
            FROM registrations r
            JOIN users u ON u.id = r.user_id
            WHERE r.event_id = ?
            ORDER BY r.id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch event registrations")
        .map_err(AppError::database)
    }
}
