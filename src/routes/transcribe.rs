use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method},
    response::Response,
};
use std::sync::Arc;
use tracing::info;

use crate::{handlers::transcribe_handler, state::app_state::AppState};

pub async fn handle_transcribe(
    state: State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match &body {
        Ok(bytes) => info!("Handling {} transcription request ({} bytes)", method, bytes.len()),
        Err(rejection) => info!("Handling {} transcription request ({})", method, rejection),
    }
    transcribe_handler::handle_transcribe(state, method, headers, body).await
}
