//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. Each instance owns its own recorder, built
//! in `recorder.rs`, and records into it with the `metrics` crate macros
//! scoped by `metrics::with_local_recorder`. Nothing is registered globally,
//! so the tracker holds no process-wide state.

use super::series::SeriesNames;
use crate::domain::{Metrics, RequestLabels};
use metrics::{counter, histogram, with_local_recorder};
use metrics_exporter_prometheus::{PrometheusHandle, PrometheusRecorder};
use std::time::Duration;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    names: SeriesNames,
}

impl PrometheusMetrics {
    // ---
    pub fn new(recorder: PrometheusRecorder, names: SeriesNames) -> Self {
        // ---
        tracing::info!("Creating Prometheus metrics");
        let handle = recorder.handle();
        with_local_recorder(&recorder, || names.describe());

        PrometheusMetrics {
            recorder,
            handle,
            names,
        }
    }
}

impl Metrics for PrometheusMetrics {
    // ---
    fn render(&self) -> String {
        // ---
        self.handle.run_upkeep();
        self.handle.render()
    }

    fn increment_request_count(&self, labels: &RequestLabels, code: &str) {
        // ---
        with_local_recorder(&self.recorder, || {
            counter!(
                self.names.request_count.clone(),
                "service" => labels.service.clone(),
                "tenant" => labels.tenant.clone(),
                "method" => labels.method.clone(),
                "code" => code.to_string(),
            )
            .increment(1);
        });
    }

    fn increment_error_count(&self, labels: &RequestLabels, code: &str) {
        // ---
        with_local_recorder(&self.recorder, || {
            counter!(
                self.names.request_error_count.clone(),
                "service" => labels.service.clone(),
                "tenant" => labels.tenant.clone(),
                "method" => labels.method.clone(),
                "code" => code.to_string(),
            )
            .increment(1);
        });
    }

    fn add_ingress_bytes(&self, labels: &RequestLabels, bytes: u64) {
        // ---
        with_local_recorder(&self.recorder, || {
            counter!(
                self.names.ingress_bytes.clone(),
                "service" => labels.service.clone(),
                "tenant" => labels.tenant.clone(),
                "method" => labels.method.clone(),
            )
            .increment(bytes);
        });
    }

    fn add_egress_bytes(&self, labels: &RequestLabels, bytes: u64) {
        // ---
        with_local_recorder(&self.recorder, || {
            counter!(
                self.names.egress_bytes.clone(),
                "service" => labels.service.clone(),
                "tenant" => labels.tenant.clone(),
                "method" => labels.method.clone(),
            )
            .increment(bytes);
        });
    }

    fn observe_duration(&self, labels: &RequestLabels, duration: Duration) {
        // ---
        with_local_recorder(&self.recorder, || {
            histogram!(
                self.names.request_duration_seconds.clone(),
                "service" => labels.service.clone(),
                "tenant" => labels.tenant.clone(),
                "method" => labels.method.clone(),
            )
            .record(duration);
        });
    }
}
