use crate::client::transcriber::TranscriptionError;
use crate::config::types::MIB;
use crate::models::{responses::now_timestamp, AccessLogMeta};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    ConfigurationMissing { env_var: String },
    BadContentType(Option<String>),
    InvalidBody(String),
    PayloadTooLarge { size_bytes: usize, max_bytes: usize },
    MissingAudio,
    UpstreamTranscription { status: StatusCode, details: String },
    Internal(String),
}

/// Size in MiB rounded to the nearest integer, formatted as `"26MB"`.
pub fn format_megabytes(bytes: usize) -> String {
    format!("{}MB", (bytes as f64 / MIB as f64).round() as u64)
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ConfigurationMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadContentType(_)
            | AppError::InvalidBody(_)
            | AppError::PayloadTooLarge { .. }
            | AppError::MissingAudio => StatusCode::BAD_REQUEST,
            AppError::UpstreamTranscription { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn upstream_message(status: StatusCode) -> &'static str {
        match status.as_u16() {
            401 => "Invalid API key",
            429 => "Rate limit exceeded. Please try again later.",
            413 => "Audio file too large for transcription service",
            _ => "Transcription request failed",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::ConfigurationMissing { env_var } => write!(f, "{} not configured", env_var),
            AppError::BadContentType(_) => {
                write!(f, "Invalid content type. Expected multipart/form-data")
            }
            AppError::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
            AppError::PayloadTooLarge { max_bytes, .. } => write!(
                f,
                "File too large. Maximum size is {}",
                format_megabytes(*max_bytes)
            ),
            AppError::MissingAudio => write!(f, "No audio file found in form data"),
            AppError::UpstreamTranscription { status, .. } => {
                write!(f, "{}", Self::upstream_message(*status))
            }
            AppError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        let (body, log_error) = match &self {
            AppError::ConfigurationMissing { env_var } => (
                json!({
                    "error": error_message,
                    "setup": format!(
                        "Set the {} environment variable to your transcription API key and restart the service",
                        env_var
                    ),
                }),
                error_message.clone(),
            ),
            AppError::BadContentType(received) => (
                json!({
                    "error": error_message,
                    "received": received.as_deref().unwrap_or("none"),
                }),
                error_message.clone(),
            ),
            AppError::PayloadTooLarge { size_bytes, .. } => (
                json!({
                    "error": error_message,
                    "fileSize": format_megabytes(*size_bytes),
                }),
                error_message.clone(),
            ),
            AppError::UpstreamTranscription {
                status: upstream,
                details,
            } => {
                let mut body = json!({
                    "error": error_message,
                    "details": details,
                    "status": upstream.as_u16(),
                });
                match upstream.as_u16() {
                    401 => body["help"] = json!("Check that the transcription API key is valid"),
                    429 => body["help"] = json!("Wait a moment before sending more audio"),
                    _ => {}
                }
                (body, format!("{}: {}", error_message, details))
            }
            AppError::Internal(message) => (
                json!({
                    "error": error_message,
                    "message": message,
                    "timestamp": now_timestamp(),
                }),
                format!("{}: {}", error_message, message),
            ),
            _ => (json!({ "error": error_message }), error_message.clone()),
        };

        let mut response = (status, Json(body)).into_response();

        // Inject error details for access logging
        response.extensions_mut().insert(AccessLogMeta {
            model: "-".to_string(),
            error: Some(log_error),
        });

        response
    }
}

impl From<TranscriptionError> for AppError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Upstream { status, body } => AppError::UpstreamTranscription {
                status,
                details: body,
            },
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(format!("External request failed: {}", err))
    }
}
