// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use domain::{MetricsPtr, TrackingDefaults};
use handlers::{echo_handler, health_check, metrics_handler, root_handler, status_handler};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;
mod tracker;

// Hoist up only the public symbol(s)
pub use middleware::track_metrics;
pub use tracker::RequestTracker;

pub use config::*;

// Publicly expose the metrics sinks and their factory functions
pub use infrastructure::metrics::{InMemoryMetrics, NoopMetrics, PrometheusMetrics};
pub use infrastructure::{
    create_memory_metrics, // ---
    create_noop_metrics,
    create_prom_metrics,
};

/// Create the metrics sink selected by configuration.
pub fn create_metrics(config: &MetricsConfig) -> Result<MetricsPtr> {
    // ---
    match config.backend {
        MetricsBackend::Prometheus => create_prom_metrics(&config.namespace),
        MetricsBackend::Memory => create_memory_metrics(),
        MetricsBackend::Noop => create_noop_metrics(),
    }
}

/// Build the HTTP router with configuration read from environment variables.
pub fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;
    let metrics = create_metrics(&config.metrics)?;

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    Ok(build_router(&config, metrics))
}

/// Build the HTTP router around an existing metrics sink.
///
/// Every route, including `/metrics` itself and unmatched paths, passes
/// through the request tracking middleware.
pub fn build_router(config: &AppConfig, metrics: MetricsPtr) -> Router {
    // ---
    let defaults = TrackingDefaults::new(&config.tracking.service, &config.tracking.tenant);
    let tracker = RequestTracker::with_defaults(defaults, metrics);

    let app_state = AppState::new(tracker.clone(), config.server.echo_limit);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/echo", post(echo_handler))
        .route("/status/{code}", get(status_handler))
        .fallback(|| async { axum::http::StatusCode::NOT_FOUND })
        .layer(axum::middleware::from_fn_with_state(tracker, track_metrics))
        .with_state(app_state)
}
