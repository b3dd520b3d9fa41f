mod prometheus_metrics;
mod recorder;
pub(crate) mod series;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

use recorder::build_recorder;
use series::SeriesNames;

/// Creates a new Prometheus metrics implementation.
///
/// Series names are prefixed with `namespace` when it is non-empty. The
/// returned sink renders its series in Prometheus text format for the
/// `/metrics` endpoint to expose.
pub fn create(namespace: &str) -> anyhow::Result<crate::domain::MetricsPtr> {
    // ---
    tracing::info!(namespace, "Initializing Prometheus metrics");

    let names = SeriesNames::new(namespace);
    let recorder = build_recorder(&names)?;

    Ok(Arc::new(PrometheusMetrics::new(recorder, names)))
}
