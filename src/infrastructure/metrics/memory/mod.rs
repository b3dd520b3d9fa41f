// src/infrastructure/metrics/memory/mod.rs
mod memory_metrics;

pub use memory_metrics::InMemoryMetrics;
use std::sync::Arc;

/// Creates a new in-memory metrics implementation.
///
/// Values are kept in process memory and can be read back, which makes this
/// backend convenient for tests and local development. Rendering produces
/// Prometheus-style text lines without type or help metadata.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    Ok(Arc::new(InMemoryMetrics::new()))
}
