use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    app_error::AppError,
    client::translator::Translator,
    handlers::{
        script::{contains_bengali, needs_translation},
        upload::{
            content_type, decode_transport, extract_audio, is_connectivity_probe,
            is_multipart_form_data,
        },
        utils::panic_message,
    },
    metrics::prometheus::{record_translation, record_upstream_error},
    models::{
        audio::TranscriptionRequest,
        responses::{now_timestamp, ProbeResponse, TranscriptionResponse, CONFIDENCE_PLACEHOLDER},
        AccessLogMeta,
    },
    state::app_state::AppState,
};

/// Entry point for the transcription endpoint.
///
/// Every outcome, including a panic further down, is rendered as a JSON response.
pub async fn handle_transcribe(
    State(app_state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let outcome = AssertUnwindSafe(process_request(&app_state, &method, &headers, body))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            match &err {
                AppError::UpstreamTranscription { .. } | AppError::Internal(_) => {
                    error!("Transcription request failed: {} ({:?})", err, err)
                }
                _ => info!("Rejected transcription request: {}", err),
            }
            err.into_response()
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Transcription handler panicked: {}", message);
            AppError::Internal(message).into_response()
        }
    }
}

async fn process_request(
    app_state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    if *method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let api_key = app_state
        .credentials
        .api_key()
        .ok_or_else(|| AppError::ConfigurationMissing {
            env_var: app_state.credentials.source().to_string(),
        })?;

    // Over the server body limit: no probe, size reported after the content-type check.
    let body = match body {
        Ok(body) => Some(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => None,
        Err(rejection) => return Err(AppError::InvalidBody(rejection.body_text())),
    };

    if body.as_ref().is_some_and(is_connectivity_probe) {
        info!("Connectivity probe answered without contacting upstream services");
        return Ok(Json(ProbeResponse {
            success: true,
            message: "Transcription endpoint is reachable and configured".to_string(),
            api_key_present: true,
            timestamp: now_timestamp(),
        })
        .into_response());
    }

    let multipart_type = match content_type(headers) {
        Some(ct) if is_multipart_form_data(&ct) => ct,
        other => return Err(AppError::BadContentType(other)),
    };

    let config = app_state.config_manager.get_config().await;

    let Some(body) = body else {
        return Err(AppError::PayloadTooLarge {
            size_bytes: declared_length(headers).unwrap_or(config.server.max_body_bytes),
            max_bytes: config.transcription.max_audio_bytes,
        });
    };

    let decoded = decode_transport(headers, body)?;
    if decoded.len() > config.transcription.max_audio_bytes {
        return Err(AppError::PayloadTooLarge {
            size_bytes: decoded.len(),
            max_bytes: config.transcription.max_audio_bytes,
        });
    }

    let audio = extract_audio(&multipart_type, decoded).await?;
    info!(
        "Transcribing {} bytes of audio ({})",
        audio.len(),
        audio.file_name.as_deref().unwrap_or("unnamed")
    );

    let model = config.transcription.model.clone();
    let request = TranscriptionRequest {
        audio,
        model: model.clone(),
        language: config.transcription.language.clone(),
    };

    let transcription = match app_state.transcriber.transcribe(&api_key, request).await {
        Ok(transcription) => transcription,
        Err(err) => {
            let err = AppError::from(err);
            if let AppError::UpstreamTranscription { status, .. } = &err {
                record_upstream_error(status.as_u16());
            }
            return Err(err);
        }
    };

    let bengali = if !config.translation.enabled {
        record_translation("skipped");
        transcription.text.clone()
    } else if needs_translation(&transcription.text) {
        translate_or_original(app_state.translator.as_ref(), &transcription.text).await
    } else {
        if contains_bengali(&transcription.text) {
            info!("Transcript already contains Bengali script, skipping translation");
        }
        record_translation("skipped");
        transcription.text.clone()
    };

    let mut response = Json(TranscriptionResponse {
        success: true,
        original: transcription.text,
        bengali,
        detected_language: transcription
            .language
            .unwrap_or_else(|| "unknown".to_string()),
        confidence: CONFIDENCE_PLACEHOLDER,
        timestamp: now_timestamp(),
        model: model.clone(),
        duration: transcription.duration,
    })
    .into_response();

    response.extensions_mut().insert(AccessLogMeta { model, error: None });

    Ok(response)
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Best-effort translation: any failure yields the original text.
pub async fn translate_or_original(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text).await {
        Ok(translated) => {
            record_translation("translated");
            translated
        }
        Err(e) => {
            warn!("Translation failed, returning original text: {}", e);
            record_translation("fallback");
            text.to_string()
        }
    }
}
