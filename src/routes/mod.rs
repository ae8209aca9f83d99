use crate::{
    metrics::{exporter::create_metrics_router, middleware::metrics_middleware},
    state::app_state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod health;
pub mod transcribe;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Builds the service router.
///
/// The transcription routes accept every method so that preflight and
/// method errors are answered by the handler with a JSON body.
pub fn create_router(app_state: Arc<AppState>, max_body_bytes: usize) -> Router {
    let transcribe_routes = Router::new()
        .route("/api/transcribe", any(transcribe::handle_transcribe))
        .route("/transcribe", any(transcribe::handle_transcribe))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(transcribe_routes)
        .merge(create_metrics_router())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(axum_middleware::from_fn(metrics_middleware))
        .with_state(app_state)
}
