use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};

use evently::logging::init_tracing;
use evently::router::init_router;
use evently::state::{AppState, init_app_state};
use evently_config::ServerConfig;

/// Deletes expired refresh tokens every `interval_secs` seconds.
fn spawn_refresh_token_sweeper(state: &AppState, interval_secs: u64) {
    if interval_secs == 0 {
        info!("Refresh token sweep disabled");
        return;
    }

    let store = state.refresh_tokens.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(0) => {}
                Ok(deleted) => info!(deleted, "Purged expired refresh tokens"),
                Err(e) => error!(error = %e, "Failed to purge expired refresh tokens"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    spawn_refresh_token_sweeper(&state, server_config.refresh_token_sweep_interval);

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
