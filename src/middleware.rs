//! Axum middleware that tracks every request passing through a router.
//!
//! ```ignore
//! let router = Router::new()
//!     .route("/", get(root_handler))
//!     .layer(axum::middleware::from_fn_with_state(tracker, track_metrics));
//! ```
//!
//! Routes or outer layers can override the service and tenant labels by
//! inserting a [`TrackingOptions`] into the request extensions.

use crate::domain::TrackingOptions;
use crate::tracker::RequestTracker;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Tracks the request with `tracker`, then hands it to the rest of the stack.
pub async fn track_metrics(
    State(tracker): State<RequestTracker>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let options = request
        .extensions()
        .get::<TrackingOptions>()
        .cloned()
        .unwrap_or_default();

    tracker
        .track_request(|request| next.run(request), request, &options)
        .await
}
