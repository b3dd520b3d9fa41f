// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Every setting has a default, so an empty environment yields a working
//! service that listens locally with metrics disabled.

use anyhow::{bail, Result};

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable as a string.
///
/// If the variable is missing or not valid unicode, the provided
/// default value is used.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub metrics: sink::MetricsConfig,
    pub tracking: tracking::TrackingConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if a setting is present but invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            metrics: sink::MetricsConfig::from_env()?,
            tracking: tracking::TrackingConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;
    use std::net::SocketAddr;

    /// Listener configuration for the HTTP server.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Address to bind. Defaults to 127.0.0.1:8080.
        pub bind_addr: SocketAddr,

        /// Largest request body `/echo` accepts, in bytes. Defaults to 1 MiB.
        pub echo_limit: usize,
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `API_BIND_ADDR` is not a valid socket address.
        pub fn from_env() -> Result<Self> {
            // ---
            let raw = optional_env!("API_BIND_ADDR", "127.0.0.1:8080");
            let bind_addr = raw
                .parse::<SocketAddr>()
                .map_err(|e| anyhow::anyhow!("Invalid API_BIND_ADDR '{raw}': {e}"))?;
            let echo_limit = optional_env_parse!("AXUM_ECHO_LIMIT_BYTES", usize, 1024 * 1024);

            Ok(Self {
                bind_addr,
                echo_limit,
            })
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Metrics configuration
// ============================================================

mod sink {
    // ---
    use super::*;

    /// Which metrics sink backs the request tracker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        /// Prometheus text exposition, scraped from `/metrics`.
        Prometheus,
        /// Values kept in process memory.
        Memory,
        /// Everything is discarded.
        Noop,
    }

    impl std::str::FromStr for MetricsBackend {
        type Err = anyhow::Error;

        fn from_str(value: &str) -> Result<Self> {
            // ---
            match value.to_ascii_lowercase().as_str() {
                "prom" | "prometheus" => Ok(Self::Prometheus),
                "memory" => Ok(Self::Memory),
                "noop" | "" => Ok(Self::Noop),
                other => bail!("Unknown AXUM_METRICS_TYPE '{other}' (expected prom, memory or noop)"),
            }
        }
    }

    /// Metrics sink configuration.
    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        /// Sink selected by `AXUM_METRICS_TYPE`. Defaults to noop.
        pub backend: MetricsBackend,

        /// Prefix joined to every series name with `_`. Defaults to none.
        pub namespace: String,
    }

    impl MetricsConfig {
        /// Builds a [`MetricsConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `AXUM_METRICS_TYPE` names an unknown backend.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend = optional_env!("AXUM_METRICS_TYPE", "noop").parse()?;
            let namespace = optional_env!("AXUM_METRICS_NAMESPACE", "");

            Ok(Self { backend, namespace })
        }
    }
}
pub use sink::{MetricsBackend, MetricsConfig};

// ============================================================
// Tracking configuration
// ============================================================

mod tracking {
    // ---
    use super::*;
    use crate::domain::{DEFAULT_SERVICE, DEFAULT_TENANT};

    /// Default labels for requests that do not name their own.
    #[derive(Debug, Clone)]
    pub struct TrackingConfig {
        /// Default service label. Defaults to `none`.
        pub service: String,

        /// Default tenant label. Defaults to `system`.
        pub tenant: String,
    }

    impl TrackingConfig {
        /// Builds a [`TrackingConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            let service = optional_env!("AXUM_TRACKING_SERVICE", DEFAULT_SERVICE);
            let tenant = optional_env!("AXUM_TRACKING_TENANT", DEFAULT_TENANT);

            Ok(Self { service, tenant })
        }
    }
}
pub use tracking::TrackingConfig;

// ============================================================
// Tests
// ============================================================
