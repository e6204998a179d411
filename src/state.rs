use anyhow::Context;
use sqlx::SqlitePool;

use evently_auth::TokenIssuer;
use evently_config::{CorsConfig, DatabaseConfig, JwtConfig};
use evently_core::dummy_password_hash;
use evently_db::{RefreshTokenStore, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_config: JwtConfig,
    pub token_issuer: TokenIssuer,
    pub refresh_tokens: RefreshTokenStore,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: SqlitePool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        let token_issuer = TokenIssuer::new(jwt_config.clone());
        let refresh_tokens = RefreshTokenStore::new(db.clone(), token_issuer.clone());

        Self {
            db,
            jwt_config,
            token_issuer,
            refresh_tokens,
            cors_config,
        }
    }
}

/// Loads configuration, opens the pool and applies pending migrations.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    jwt_config.require_secret()?;

    let database_config = DatabaseConfig::from_env();
    let db = init_db_pool(&database_config)
        .await
        .with_context(|| format!("Failed to connect to database at {}", database_config.url))?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    tokio::task::spawn_blocking(dummy_password_hash)
        .await
        .context("Failed to prepare dummy password hash")?;

    Ok(AppState::new(db, jwt_config, CorsConfig::from_env()))
}
