//! In-memory metrics implementation.
//!
//! Keeps every series in a `BTreeMap` behind a single `Mutex`. Unlike the
//! Prometheus sink, values can be read back, which is what tests use to
//! assert on exactly what the tracker emitted.

use crate::domain::{Metrics, RequestLabels};
use crate::infrastructure::metrics::prometheus::series;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type CodeKey = (RequestLabels, String);

/// Running count and total of the durations observed for one label set.
#[derive(Debug, Default, Clone, Copy)]
struct DurationSummary {
    count: u64,
    sum: Duration,
}

#[derive(Debug, Default)]
struct State {
    requests: BTreeMap<CodeKey, u64>,
    errors: BTreeMap<CodeKey, u64>,
    ingress: BTreeMap<RequestLabels, u64>,
    egress: BTreeMap<RequestLabels, u64>,
    durations: BTreeMap<RequestLabels, DurationSummary>,
}

/// Metrics sink that keeps all series in process memory.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    state: Mutex<State>,
}

impl InMemoryMetrics {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // ---
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests counted for the labels and status code.
    pub fn request_count(&self, labels: &RequestLabels, code: &str) -> u64 {
        // ---
        let key = (labels.clone(), code.to_string());
        self.lock().requests.get(&key).copied().unwrap_or(0)
    }

    /// Errors counted for the labels and status code.
    pub fn error_count(&self, labels: &RequestLabels, code: &str) -> u64 {
        // ---
        let key = (labels.clone(), code.to_string());
        self.lock().errors.get(&key).copied().unwrap_or(0)
    }

    /// Requests counted across every label set.
    pub fn total_requests(&self) -> u64 {
        // ---
        self.lock().requests.values().sum()
    }

    /// Errors counted across every label set.
    pub fn total_errors(&self) -> u64 {
        // ---
        self.lock().errors.values().sum()
    }

    pub fn ingress_bytes(&self, labels: &RequestLabels) -> u64 {
        // ---
        self.lock().ingress.get(labels).copied().unwrap_or(0)
    }

    pub fn egress_bytes(&self, labels: &RequestLabels) -> u64 {
        // ---
        self.lock().egress.get(labels).copied().unwrap_or(0)
    }

    /// Number of durations observed for the labels.
    pub fn duration_count(&self, labels: &RequestLabels) -> u64 {
        // ---
        self.lock().durations.get(labels).map_or(0, |d| d.count)
    }

    /// Sum of the durations observed for the labels.
    pub fn duration_sum(&self, labels: &RequestLabels) -> Duration {
        // ---
        self.lock()
            .durations
            .get(labels)
            .map_or(Duration::ZERO, |d| d.sum)
    }
}

/// Escapes a label value for the text exposition format.
fn escape_label(value: &str) -> Cow<'_, str> {
    // ---
    if !value.contains(['\\', '"', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str(r#"\""#),
            '\n' => escaped.push_str(r"\n"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn request_line(name: &str, labels: &RequestLabels) -> String {
    // ---
    format!(
        r#"{name}{{service="{}",tenant="{}",method="{}""#,
        escape_label(&labels.service),
        escape_label(&labels.tenant),
        escape_label(&labels.method)
    )
}

impl Metrics for InMemoryMetrics {
    // ---
    fn render(&self) -> String {
        // ---
        let state = self.lock();
        let mut out = String::new();

        for ((labels, code), value) in &state.requests {
            let prefix = request_line(series::REQUEST_COUNT, labels);
            let code = escape_label(code);
            let _ = writeln!(out, r#"{prefix},code="{code}"}} {value}"#);
        }
        for ((labels, code), value) in &state.errors {
            let prefix = request_line(series::REQUEST_ERROR_COUNT, labels);
            let code = escape_label(code);
            let _ = writeln!(out, r#"{prefix},code="{code}"}} {value}"#);
        }
        for (labels, value) in &state.ingress {
            let prefix = request_line(series::INGRESS_BYTES, labels);
            let _ = writeln!(out, "{prefix}}} {value}");
        }
        for (labels, value) in &state.egress {
            let prefix = request_line(series::EGRESS_BYTES, labels);
            let _ = writeln!(out, "{prefix}}} {value}");
        }
        for (labels, summary) in &state.durations {
            let name = format!("{}_count", series::REQUEST_DURATION_SECONDS);
            let prefix = request_line(&name, labels);
            let _ = writeln!(out, "{prefix}}} {}", summary.count);

            let name = format!("{}_sum", series::REQUEST_DURATION_SECONDS);
            let prefix = request_line(&name, labels);
            let _ = writeln!(out, "{prefix}}} {}", summary.sum.as_secs_f64());
        }

        out
    }

    fn increment_request_count(&self, labels: &RequestLabels, code: &str) {
        // ---
        let key = (labels.clone(), code.to_string());
        *self.lock().requests.entry(key).or_default() += 1;
    }

    fn increment_error_count(&self, labels: &RequestLabels, code: &str) {
        // ---
        let key = (labels.clone(), code.to_string());
        *self.lock().errors.entry(key).or_default() += 1;
    }

    fn add_ingress_bytes(&self, labels: &RequestLabels, bytes: u64) {
        // ---
        *self.lock().ingress.entry(labels.clone()).or_default() += bytes;
    }

    fn add_egress_bytes(&self, labels: &RequestLabels, bytes: u64) {
        // ---
        *self.lock().egress.entry(labels.clone()).or_default() += bytes;
    }

    fn observe_duration(&self, labels: &RequestLabels, duration: Duration) {
        // ---
        let mut state = self.lock();
        let summary = state.durations.entry(labels.clone()).or_default();
        summary.count += 1;
        summary.sum += duration;
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn labels(method: &str) -> RequestLabels {
        // ---
        RequestLabels {
            service: "none".to_string(),
            tenant: "system".to_string(),
            method: method.to_string(),
        }
    }

    #[test]
    fn counters_accumulate_per_label_set() {
        // ---
        let metrics = InMemoryMetrics::new();

        metrics.increment_request_count(&labels("GET"), "200");
        metrics.increment_request_count(&labels("GET"), "200");
        metrics.increment_request_count(&labels("POST"), "201");
        metrics.add_egress_bytes(&labels("GET"), 10);
        metrics.add_egress_bytes(&labels("GET"), 5);

        assert_eq!(metrics.request_count(&labels("GET"), "200"), 2);
        assert_eq!(metrics.request_count(&labels("POST"), "201"), 1);
        assert_eq!(metrics.request_count(&labels("POST"), "200"), 0);
        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.egress_bytes(&labels("GET")), 15);
        assert_eq!(metrics.ingress_bytes(&labels("GET")), 0);
    }

    #[test]
    fn render_lists_recorded_series() {
        // ---
        let metrics = InMemoryMetrics::new();
        metrics.increment_request_count(&labels("GET"), "503");
        metrics.increment_error_count(&labels("GET"), "503");
        metrics.observe_duration(&labels("GET"), Duration::from_millis(250));

        let body = metrics.render();
        assert!(body.contains(
            r#"http_request_count{service="none",tenant="system",method="GET",code="503"} 1"#
        ));
        assert!(body.contains(
            r#"http_request_error_count{service="none",tenant="system",method="GET",code="503"} 1"#
        ));
        assert!(body.contains(
            r#"http_request_duration_seconds_count{service="none",tenant="system",method="GET"} 1"#
        ));
    }

    #[test]
    fn durations_are_summarized_per_label_set() {
        // ---
        let metrics = InMemoryMetrics::new();
        for _ in 0..1_000 {
            metrics.observe_duration(&labels("GET"), Duration::from_millis(2));
        }
        metrics.observe_duration(&labels("POST"), Duration::from_millis(7));

        assert_eq!(metrics.duration_count(&labels("GET")), 1_000);
        assert_eq!(metrics.duration_sum(&labels("GET")), Duration::from_secs(2));
        assert_eq!(metrics.duration_count(&labels("POST")), 1);
        assert_eq!(metrics.duration_sum(&labels("POST")), Duration::from_millis(7));
        assert_eq!(metrics.duration_count(&labels("PUT")), 0);
        assert_eq!(metrics.duration_sum(&labels("PUT")), Duration::ZERO);

        let body = metrics.render();
        assert!(body.contains(
            r#"http_request_duration_seconds_count{service="none",tenant="system",method="GET"} 1000"#
        ));
        assert!(body.contains(
            r#"http_request_duration_seconds_sum{service="none",tenant="system",method="GET"} 2"#
        ));
    }

    #[test]
    fn render_escapes_label_values() {
        // ---
        let metrics = InMemoryMetrics::new();
        let labels = RequestLabels {
            service: "a\"b".to_string(),
            tenant: "x\ny".to_string(),
            method: r"G\T".to_string(),
        };
        metrics.increment_request_count(&labels, "200");

        let body = metrics.render();
        assert_eq!(body.lines().count(), 1, "unexpected output: {body}");
        assert_eq!(
            body.trim_end(),
            r#"http_request_count{service="a\"b",tenant="x\ny",method="G\\T",code="200"} 1"#
        );
    }
}
