use axum::{extract::Path, http::StatusCode};

/// Handler for `GET /status/{code}`.
///
/// Responds with the requested status code and an empty body. Codes that
/// are not valid HTTP status codes yield `400 Bad Request`.
pub async fn status_handler(Path(code): Path<u16>) -> StatusCode {
    // ---
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}
