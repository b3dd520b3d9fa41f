use anyhow::Result;
use axum_request_metrics::{build_router, create_metrics, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let metrics = create_metrics(&config.metrics)?;
    let app = build_router(&config, metrics);

    info!("Starting at endpoint:{}", config.server.bind_addr);
    info!(
        "Starting Axum Request Metrics server v{}...",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        backend = ?config.metrics.backend,
        service = %config.tracking.service,
        tenant = %config.tracking.tenant,
        "Request tracking enabled"
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C so in-flight responses can finish and be recorded.
async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}
