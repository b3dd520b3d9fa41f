//! Tracking options, label normalization and the per-request observation.
//!
//! Everything in this module is plain data. The tracker resolves
//! [`TrackingOptions`] against [`TrackingDefaults`] into [`RequestLabels`],
//! pairs them with what was measured into an [`Observation`], and the
//! observation is then fanned out into the aggregate series.

use axum::body::HttpBody;
use axum::http::{header, Request};
use std::borrow::Cow;
use std::time::Duration;

/// Service label used when neither the call nor the tracker names one.
pub const DEFAULT_SERVICE: &str = "none";

/// Tenant label used when neither the call nor the tracker names one.
pub const DEFAULT_TENANT: &str = "system";

/// Status label used when no response was observed.
pub const NO_RESPONSE_CODE: &str = "000";

/// Responses with a status code above this one are counted as errors.
const ERROR_THRESHOLD: i32 = 400;

// ============================================================
// Options
// ============================================================

/// Per-call options for tracking a request.
///
/// `response_status_code` and `response_bytes` are only read in manual
/// mode; in wrapping mode they are captured from the response itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackingOptions {
    pub service: Option<String>,
    pub tenant: Option<String>,
    pub response_status_code: Option<i32>,
    pub response_bytes: Option<u64>,
}

impl TrackingOptions {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    /// Sets the service label. An empty value leaves it unset.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        // ---
        self.service = non_empty(service.into());
        self
    }

    /// Sets the tenant label. An empty value leaves it unset.
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        // ---
        self.tenant = non_empty(tenant.into());
        self
    }

    /// Status code of a response the caller wrote itself. A negative value
    /// means no response was observed.
    pub fn response_status_code(mut self, code: i32) -> Self {
        // ---
        self.response_status_code = Some(code);
        self
    }

    /// Number of body bytes the caller wrote itself.
    pub fn response_bytes(mut self, bytes: u64) -> Self {
        // ---
        self.response_bytes = Some(bytes);
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    // ---
    (!value.is_empty()).then_some(value)
}

/// Labels applied when a call does not set its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingDefaults {
    pub service: String,
    pub tenant: String,
}

impl TrackingDefaults {
    // ---
    /// Builds defaults, falling back to `none` / `system` for empty values.
    pub fn new(service: impl Into<String>, tenant: impl Into<String>) -> Self {
        // ---
        Self {
            service: non_empty(service.into()).unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            tenant: non_empty(tenant.into()).unwrap_or_else(|| DEFAULT_TENANT.to_string()),
        }
    }

    /// Merges call options over these defaults and normalizes the result.
    ///
    /// Service and tenant are lower-cased; the method is kept as given.
    pub fn resolve(&self, options: &TrackingOptions, method: &str) -> RequestLabels {
        // ---
        let service = options.service.as_deref().unwrap_or(&self.service);
        let tenant = options.tenant.as_deref().unwrap_or(&self.tenant);

        RequestLabels {
            service: service.to_lowercase(),
            tenant: tenant.to_lowercase(),
            method: method.to_string(),
        }
    }
}

impl Default for TrackingDefaults {
    // ---
    fn default() -> Self {
        // ---
        Self::new(DEFAULT_SERVICE, DEFAULT_TENANT)
    }
}

// ============================================================
// Request descriptor and labels
// ============================================================

/// What the tracker needs to know about an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: String,
    pub content_length: u64,
}

impl RequestInfo {
    // ---
    pub fn new(method: impl Into<String>, content_length: u64) -> Self {
        // ---
        Self {
            method: method.into(),
            content_length,
        }
    }

    /// Describes a request from its method and declared body size.
    ///
    /// The size comes from `Content-Length`, then from an exact body size
    /// hint, and is 0 when neither is known.
    pub fn from_request<B: HttpBody>(request: &Request<B>) -> Self {
        // ---
        let declared = request
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let content_length = declared
            .or_else(|| request.body().size_hint().exact())
            .unwrap_or(0);

        Self::new(request.method().as_str(), content_length)
    }
}

/// Normalized label values shared by every series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestLabels {
    pub service: String,
    pub tenant: String,
    pub method: String,
}

// ============================================================
// Observation
// ============================================================

/// Everything measured about one tracked request.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub labels: RequestLabels,
    pub status_code: i32,
    pub duration: Duration,
    pub ingress_bytes: u64,
    pub egress_bytes: u64,
}

impl Observation {
    // ---
    /// The status code as a label value, `000` when no response was observed.
    pub fn status_label(&self) -> Cow<'static, str> {
        // ---
        if self.status_code < 0 {
            Cow::Borrowed(NO_RESPONSE_CODE)
        } else {
            Cow::Owned(self.status_code.to_string())
        }
    }

    /// Whether this request also counts towards the error series.
    ///
    /// Only codes strictly above 400 count; 400 itself does not.
    pub fn is_error(&self) -> bool {
        // ---
        self.status_code > ERROR_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use axum::body::Body;

    fn observation(status_code: i32) -> Observation {
        // ---
        Observation {
            labels: TrackingDefaults::default().resolve(&TrackingOptions::new(), "GET"),
            status_code,
            duration: Duration::ZERO,
            ingress_bytes: 0,
            egress_bytes: 0,
        }
    }

    #[test]
    fn defaults_fill_unset_options() {
        // ---
        let labels = TrackingDefaults::default().resolve(&TrackingOptions::new(), "GET");
        assert_eq!(labels.service, "none");
        assert_eq!(labels.tenant, "system");
        assert_eq!(labels.method, "GET");
    }

    #[test]
    fn empty_builder_values_fall_back_to_defaults() {
        // ---
        let options = TrackingOptions::new().service("").tenant("");
        let labels = TrackingDefaults::new("Billing", "").resolve(&options, "POST");
        assert_eq!(labels.service, "billing");
        assert_eq!(labels.tenant, "system");
    }

    #[test]
    fn service_and_tenant_are_lower_cased() {
        // ---
        let options = TrackingOptions::new().service("Acme").tenant("TENANT1");
        let labels = TrackingDefaults::default().resolve(&options, "Patch");
        assert_eq!(labels.service, "acme");
        assert_eq!(labels.tenant, "tenant1");
        assert_eq!(labels.method, "Patch");
    }

    #[test]
    fn status_labels_and_error_threshold() {
        // ---
        assert_eq!(observation(200).status_label(), "200");
        assert!(!observation(200).is_error());
        assert!(!observation(400).is_error());
        assert!(observation(401).is_error());
        assert!(observation(503).is_error());

        let missing = observation(-1);
        assert_eq!(missing.status_label(), NO_RESPONSE_CODE);
        assert!(!missing.is_error());
    }

    #[test]
    fn request_info_prefers_content_length_header() {
        // ---
        let request = Request::post("/echo")
            .header(header::CONTENT_LENGTH, "42")
            .body(Body::empty())
            .unwrap();

        assert_eq!(RequestInfo::from_request(&request), RequestInfo::new("POST", 42));
    }

    #[test]
    fn request_info_falls_back_to_body_size() {
        // ---
        let request = Request::put("/echo").body(Body::from("hello")).unwrap();
        assert_eq!(RequestInfo::from_request(&request).content_length, 5);

        let request = Request::get("/").body(Body::empty()).unwrap();
        assert_eq!(RequestInfo::from_request(&request).content_length, 0);
    }
}
