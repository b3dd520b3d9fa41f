use super::series::SeriesNames;
use anyhow::Result;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusRecorder};

/// Default Prometheus client buckets, in seconds.
const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Build a Prometheus recorder owned by the caller.
///
/// The recorder is not installed globally; metrics are recorded into it
/// through `metrics::with_local_recorder`, so several sinks can coexist in
/// one process (tests rely on this).
pub fn build_recorder(names: &SeriesNames) -> Result<PrometheusRecorder> {
    // ---
    let recorder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(names.request_duration_seconds.clone()),
            DURATION_BUCKETS,
        )?
        .build_recorder();

    Ok(recorder)
}
