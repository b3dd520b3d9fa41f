//! Request tracking.
//!
//! [`RequestTracker`] turns one HTTP exchange into an [`Observation`] and
//! fans it out into the five aggregate series of the injected
//! [`Metrics`] sink:
//!
//! - request count, labeled with service, tenant, method and status code
//! - error count, same labels, only for status codes above 400
//! - ingress bytes, labeled with service, tenant and method
//! - egress bytes, same labels
//! - request duration in seconds, same labels
//!
//! Two call shapes are supported. [`RequestTracker::track_request`] wraps a
//! handler and captures status, bytes written and duration by itself.
//! [`RequestTracker::track_manual`] is for callers that write the response
//! on their own and report the facts through [`TrackingOptions`].

mod body;

use crate::domain::{
    MemoryTimer, // ---
    Metrics,
    MetricsPtr,
    Observation,
    RequestInfo,
    Timer,
    TrackingDefaults,
    TrackingOptions,
};
use axum::body::{Body, HttpBody};
use axum::http::Request;
use axum::response::Response;
use body::MeteredBody;
use std::future::Future;

/// Status code used when the caller reports no response.
const NO_RESPONSE: i32 = -1;

/// Records HTTP request observations into a metrics sink.
///
/// Cheap to clone and safe to share between concurrent requests: the only
/// state is the immutable defaults and a handle to the sink.
#[derive(Clone)]
pub struct RequestTracker {
    defaults: TrackingDefaults,
    metrics: MetricsPtr,
}

impl RequestTracker {
    // ---
    /// Builds a tracker labeling untagged requests as service `none`,
    /// tenant `system`.
    pub fn new(metrics: MetricsPtr) -> Self {
        // ---
        Self::with_defaults(TrackingDefaults::default(), metrics)
    }

    /// Builds a tracker with the provided default labels.
    pub fn with_defaults(defaults: TrackingDefaults, metrics: MetricsPtr) -> Self {
        // ---
        tracing::debug!(
            service = %defaults.service,
            tenant = %defaults.tenant,
            "Creating new request tracker"
        );
        Self { defaults, metrics }
    }

    pub fn defaults(&self) -> &TrackingDefaults {
        // ---
        &self.defaults
    }

    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Runs `handler` and tracks the exchange.
    ///
    /// The response is returned with its body wrapped so that bytes written
    /// are counted while being forwarded unchanged. The observation is
    /// recorded when the body has been fully written, has failed, or has
    /// been dropped, so the duration covers writing the body too. A body the
    /// server never sends (a HEAD response, a client that went away) is
    /// recorded with egress 0.
    pub async fn track_request<B, H, Fut>(
        &self,
        handler: H,
        request: Request<B>,
        options: &TrackingOptions,
    ) -> Response
    where
        B: HttpBody,
        H: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Response>,
    {
        // ---
        let info = RequestInfo::from_request(&request);
        let labels = self.defaults.resolve(options, &info.method);
        let timer = MemoryTimer::started();

        let response = handler(request).await;
        let status_code = i32::from(response.status().as_u16());

        let pending = PendingObservation {
            metrics: self.metrics.clone(),
            observation: Observation {
                labels,
                status_code,
                duration: timer.elapsed(),
                ingress_bytes: info.content_length,
                egress_bytes: 0,
            },
            timer,
        };

        let (parts, body) = response.into_parts();
        Response::from_parts(parts, Body::new(MeteredBody::new(body, pending)))
    }

    /// Tracks a request whose response the caller wrote itself.
    ///
    /// Stops `timer`, which the caller started when the request came in, and
    /// takes status code and bytes written from `options`. A missing status
    /// code is recorded as "no response observed"; missing bytes count as 0.
    pub fn track_manual<T: Timer>(
        &self,
        request: &RequestInfo,
        timer: &mut T,
        options: &TrackingOptions,
    ) {
        // ---
        timer.stop();

        let observation = Observation {
            labels: self.defaults.resolve(options, &request.method),
            status_code: options.response_status_code.unwrap_or(NO_RESPONSE),
            duration: timer.elapsed(),
            ingress_bytes: request.content_length,
            egress_bytes: options.response_bytes.unwrap_or(0),
        };

        record(self.metrics.as_ref(), &observation);
    }
}

/// An observation waiting for its response body to finish.
pub(crate) struct PendingObservation {
    metrics: MetricsPtr,
    observation: Observation,
    timer: MemoryTimer,
}

impl PendingObservation {
    // ---
    fn finish(mut self, egress_bytes: u64) {
        // ---
        self.timer.stop();
        self.observation.duration = self.timer.elapsed();
        self.observation.egress_bytes = egress_bytes;

        record(self.metrics.as_ref(), &self.observation);
    }
}

/// Fans one observation out into the aggregate series.
fn record(metrics: &dyn Metrics, observation: &Observation) {
    // ---
    let labels = &observation.labels;
    let code = observation.status_label();

    tracing::debug!(
        service = %labels.service,
        tenant = %labels.tenant,
        method = %labels.method,
        code = %code,
        duration_ms = observation.duration.as_millis() as u64,
        ingress = observation.ingress_bytes,
        egress = observation.egress_bytes,
        "Incrementing request counters"
    );

    if observation.is_error() {
        metrics.increment_error_count(labels, &code);
    }

    metrics.increment_request_count(labels, &code);
    metrics.add_ingress_bytes(labels, observation.ingress_bytes);
    metrics.add_egress_bytes(labels, observation.egress_bytes);
    metrics.observe_duration(labels, observation.duration);
}
