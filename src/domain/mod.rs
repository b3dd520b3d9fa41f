mod metrics;
mod timer;
mod tracking;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the elapsed-time tracker
pub use timer::{MemoryTimer, Timer};

// Publicly expose the tracking data model
pub use tracking::{
    Observation, // ---
    RequestInfo,
    RequestLabels,
    TrackingDefaults,
    TrackingOptions,
    DEFAULT_SERVICE,
    DEFAULT_TENANT,
    NO_RESPONSE_CODE,
};
