//! HTTP server: state, router and serving loop.

pub mod health;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

use crate::config::ServerConfig;
use anyhow::Context;

/// Bind and serve the router until Ctrl+C.
///
/// # Errors
///
/// Returns error if binding or serving fails.
pub async fn serve(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "Listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutting down gracefully...");
}
