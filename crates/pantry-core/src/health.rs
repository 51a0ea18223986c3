use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check. Services add their own `readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
