use super::tracking::RequestLabels;
use std::sync::Arc;
use std::time::Duration;

/// Abstraction for the aggregate HTTP series (counters, histogram).
///
/// Implementations own their synchronization; the tracker only ever
/// appends to them and never reads values back.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Count one request, labeled with service, tenant, method and status code.
    fn increment_request_count(&self, labels: &RequestLabels, code: &str);

    /// Count one failed request, same label set as the request counter.
    fn increment_error_count(&self, labels: &RequestLabels, code: &str);

    /// Add bytes received from the client.
    fn add_ingress_bytes(&self, labels: &RequestLabels, bytes: u64);

    /// Add bytes sent back to the client.
    fn add_egress_bytes(&self, labels: &RequestLabels, bytes: u64);

    /// Observe the time taken to process a request.
    fn observe_duration(&self, labels: &RequestLabels, duration: Duration);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
