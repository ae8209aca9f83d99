use axum::{response::IntoResponse, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness only, upstream services are not contacted.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
