use axum::{http::StatusCode, Json};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Responds with the health status of the server.
///
/// The service has no backing stores, so a response at all means healthy.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }`.
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    // ---
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
