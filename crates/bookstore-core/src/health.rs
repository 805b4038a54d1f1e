use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only; never touches the store.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
