//! todo-api バイナリのエントリポイント

use std::sync::Arc;

use anyhow::Context;
use infrastructure::InMemoryTodoRepository;
use shared::{init_tracing, Config, JwtAuthenticator};
use todo_api::{app_with_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format)
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing: {e}"))?;

    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    let state = AppState::new(
        Arc::new(InMemoryTodoRepository::new()),
        JwtAuthenticator::new(&config.jwt_secret),
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, environment = %config.environment, "server starting");

    axum::serve(listener, app_with_state(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
