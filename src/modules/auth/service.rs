use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use evently_auth::TokenError;
use evently_core::{AppError, dummy_password_hash, hash_password_async, verify_password_async};
use evently_db::RefreshTokenError;
use evently_models::{LoginRequest, LoginResponse, SignupRequest, User};

use crate::state::AppState;

pub const INVALID_CREDENTIALS: &str = "invalid credentials";
pub const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";

pub(crate) fn map_token_error(err: TokenError) -> AppError {
    match err {
        TokenError::Expired | TokenError::Invalid => AppError::unauthorized(INVALID_REFRESH_TOKEN),
        TokenError::Signing(_) | TokenError::Entropy(_) => AppError::internal(err),
    }
}

pub(crate) fn map_refresh_error(err: RefreshTokenError) -> AppError {
    match err {
        RefreshTokenError::Invalid | RefreshTokenError::Expired => {
            AppError::unauthorized(INVALID_REFRESH_TOKEN)
        }
        RefreshTokenError::Token(e) => map_token_error(e),
        RefreshTokenError::Database(e) => AppError::database(e),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn signup(db: &SqlitePool, dto: SignupRequest) -> Result<User, AppError> {
        let email = normalize_email(&dto.email);
        let password_hash = hash_password_async(dto.password).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, created_at)
            VALUES (?, ?, 'user', ?)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(chrono::Utc::now())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Email already registered");
                }
            }
            AppError::database(anyhow::Error::from(e).context("Failed to create user"))
        })?;

        info!(user_id = user.id, "user signed up");
        Ok(user)
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&dto.email);

        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = ?",
        )
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        let Some(user) = user else {
            let _ = verify_password_async(dto.password, dummy_password_hash().to_string()).await;
            warn!("login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password_async(dto.password, user.password_hash.clone()).await {
            warn!(user_id = user.id, "login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let access_token = state
            .token_issuer
            .issue_access_token(&user.email, user.id, user.role)
            .map_err(AppError::internal)?;
        let refresh_token = state
            .refresh_tokens
            .issue(user.id)
            .await
            .map_err(map_refresh_error)?;

        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse::bearer(
            "Login successful",
            access_token,
            refresh_token,
        ))
    }

    /// Consumes the refresh token and returns a new access/refresh pair.
    #[instrument(skip(state, refresh_token))]
    pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<LoginResponse, AppError> {
        let (user, new_refresh_token) = state
            .refresh_tokens
            .rotate(refresh_token)
            .await
            .map_err(map_refresh_error)?;

        let access_token = state
            .token_issuer
            .issue_access_token(&user.email, user.id, user.role)
            .map_err(AppError::internal)?;

        Ok(LoginResponse::bearer(
            "Token refreshed successfully",
            access_token,
            new_refresh_token,
        ))
    }

    #[instrument(skip(state, refresh_token))]
    pub async fn logout(state: &AppState, refresh_token: Option<&str>) -> Result<(), AppError> {
        if let Some(token) = refresh_token.filter(|t| !t.is_empty()) {
            state
                .refresh_tokens
                .delete_one(token)
                .await
                .map_err(map_refresh_error)?;
        }
        Ok(())
    }

    #[instrument(skip(state))]
    pub async fn logout_all(state: &AppState, user_id: i64) -> Result<u64, AppError> {
        let revoked = state
            .refresh_tokens
            .delete_all_for_user(user_id)
            .await
            .map_err(map_refresh_error)?;

        info!(user_id, revoked, "revoked all refresh tokens");
        Ok(revoked)
    }
}
