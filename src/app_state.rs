//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The state is cheaply cloneable
//! (`Arc` inside) so it can be handed to each request without copying the
//! underlying resources.

use crate::domain::MetricsPtr;
use crate::tracker::RequestTracker;

/// Shared application state passed to all Axum handlers.
///
/// Built once in `build_router()` and never mutated afterwards. The metrics
/// sink is shared with the request tracker, so `/metrics` renders exactly
/// what the tracking middleware recorded.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Tracker used by the middleware; also owns the metrics sink.
    tracker: RequestTracker,

    /// Largest request body the echo handler buffers.
    echo_limit: usize,
}

impl AppState {
    // ---

    pub fn new(tracker: RequestTracker, echo_limit: usize) -> Self {
        // ---
        AppState {
            tracker,
            echo_limit,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        self.tracker.metrics()
    }

    /// Get the echo body limit, in bytes.
    pub(crate) fn echo_limit(&self) -> usize {
        // ---
        self.echo_limit
    }
}

#[cfg(test)]
mod tests {
    // ---

    use super::*;
    use crate::infrastructure::create_noop_metrics;

    #[test]
    fn test_app_state_creation_and_clone() {
        // ---
        let tracker = RequestTracker::new(create_noop_metrics().unwrap());

        let app_state = AppState::new(tracker, 1024);
        let cloned = app_state.clone();

        assert_eq!(cloned.echo_limit(), 1024);
        assert!(std::sync::Arc::ptr_eq(app_state.metrics(), cloned.metrics()));
    }
}
