//! Gridlock - matchmaking server binary.

use anyhow::{Context, Result};
use clap::Parser;
use gridlock_server::{Cli, Gateway, Lobby, ServerConfig, init_tracing, router};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    let config = ServerConfig::load(&cli)?;
    run_server(config).await
}

/// Binds the listener and serves until Ctrl+C.
#[instrument(skip_all, fields(addr = %config.bind_addr()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let gateway = Gateway::new(Lobby::new(config.waiting_message().clone()));
    let app = router(gateway, config.static_dir().as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Server running on http://{}", listener.local_addr()?);
    info!("Game endpoint at ws://{}/ws", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
