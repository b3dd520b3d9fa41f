use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Request Metrics API 👋
Version: {version}

Available endpoints:
  - GET    /                  - This banner
  - GET    /health            - Light health check
  - GET    /metrics           - Request metrics in Prometheus text format
  - POST   /echo              - Echo the request body back
  - GET    /status/{{code}}     - Respond with the given status code

Every request is counted per service, tenant, method and status code,
along with ingress/egress bytes and request duration.
"#
    )
}
