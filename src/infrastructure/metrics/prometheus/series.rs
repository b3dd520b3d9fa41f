//! Names and help texts of the exported HTTP series.

use metrics::{describe_counter, describe_histogram, Unit};

pub const REQUEST_COUNT: &str = "http_request_count";
pub const REQUEST_ERROR_COUNT: &str = "http_request_error_count";
pub const EGRESS_BYTES: &str = "http_egress_bytes";
pub const INGRESS_BYTES: &str = "http_ingress_bytes";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Fully qualified series names, optionally prefixed by a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesNames {
    pub request_count: String,
    pub request_error_count: String,
    pub egress_bytes: String,
    pub ingress_bytes: String,
    pub request_duration_seconds: String,
}

impl SeriesNames {
    // ---
    /// Builds the names, joining `namespace` with `_` when it is non-empty.
    pub fn new(namespace: &str) -> Self {
        // ---
        let qualify = |name: &str| {
            if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{namespace}_{name}")
            }
        };

        Self {
            request_count: qualify(REQUEST_COUNT),
            request_error_count: qualify(REQUEST_ERROR_COUNT),
            egress_bytes: qualify(EGRESS_BYTES),
            ingress_bytes: qualify(INGRESS_BYTES),
            request_duration_seconds: qualify(REQUEST_DURATION_SECONDS),
        }
    }

    /// Registers help texts with whichever recorder is current.
    pub fn describe(&self) {
        // ---
        describe_counter!(
            self.request_count.clone(),
            "The total number of http requests"
        );
        describe_counter!(
            self.request_error_count.clone(),
            "The total number of http errors"
        );
        describe_counter!(
            self.egress_bytes.clone(),
            Unit::Bytes,
            "The total number of bytes sent back to the requesting client"
        );
        describe_counter!(
            self.ingress_bytes.clone(),
            Unit::Bytes,
            "The total number of bytes sent by the requesting client"
        );
        describe_histogram!(
            self.request_duration_seconds.clone(),
            Unit::Seconds,
            "The time taken to process a request"
        );
    }
}
