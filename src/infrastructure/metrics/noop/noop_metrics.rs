use crate::domain::{Metrics, RequestLabels};
use std::time::Duration;

/// No-op metrics implementation, used when metrics are disabled.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn increment_request_count(&self, _: &RequestLabels, _: &str) {}
    fn increment_error_count(&self, _: &RequestLabels, _: &str) {}
    fn add_ingress_bytes(&self, _: &RequestLabels, _: u64) {}
    fn add_egress_bytes(&self, _: &RequestLabels, _: u64) {}
    fn observe_duration(&self, _: &RequestLabels, _: Duration) {}
}
