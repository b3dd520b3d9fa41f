use crate::app_state::AppState;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::StatusCode,
};

/// Handler for `POST /echo`.
///
/// Responds with the request body unchanged, so ingress and egress byte
/// counters move by the same amount.
///
/// - `200 OK` with the body echoed back.
/// - `413 Payload Too Large` if the body exceeds the configured limit.
#[tracing::instrument(skip(state, body))]
pub async fn echo_handler(
    State(state): State<AppState>,
    body: Body,
) -> Result<Bytes, StatusCode> {
    // ---
    to_bytes(body, state.echo_limit()).await.map_err(|err| {
        tracing::warn!("Rejecting echo body: {}", err);
        StatusCode::PAYLOAD_TOO_LARGE
    })
}
