// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::Router;
use axum_request_metrics::domain::{MetricsPtr, RequestLabels};
use axum_request_metrics::{
    build_router, AppConfig, MetricsBackend, MetricsConfig, ServerConfig, TrackingConfig,
};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Test Setup
// ============================================================================

/// Configuration that does not depend on the process environment.
pub fn test_config() -> AppConfig {
    // ---
    AppConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            echo_limit: 1024,
        },
        metrics: MetricsConfig {
            backend: MetricsBackend::Memory,
            namespace: String::new(),
        },
        tracking: TrackingConfig {
            service: "Catalog".to_string(),
            tenant: "ACME".to_string(),
        },
    }
}

/// Labels the test configuration produces for `method`.
pub fn labels(method: &str) -> RequestLabels {
    // ---
    RequestLabels {
        service: "catalog".to_string(),
        tenant: "acme".to_string(),
        method: method.to_string(),
    }
}

pub fn test_router(metrics: MetricsPtr) -> Router {
    // ---
    build_router(&test_config(), metrics)
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new(app: Router) -> Self {
        // --
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}

/// Response bodies are recorded once the server has finished writing them,
/// which can trail the client reading the last byte slightly.
pub async fn settle() {
    // ---
    sleep(Duration::from_millis(50)).await;
}
