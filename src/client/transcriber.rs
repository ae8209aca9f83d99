use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::config_manager::ConfigManager;
use crate::models::audio::{Transcription, TranscriptionRequest};

/// File name and content type the upload is always forwarded under.
pub const UPLOAD_FILE_NAME: &str = "audio.webm";
pub const UPLOAD_CONTENT_TYPE: &str = "audio/webm";

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription service returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("transcription request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected transcription response: {0}")]
    InvalidResponse(String),
}

/// Speech-to-text backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        api_key: &str,
        request: TranscriptionRequest,
    ) -> Result<Transcription, TranscriptionError>;
}

/// Client for OpenAI-compatible `/audio/transcriptions` endpoints (Groq by default).
pub struct GroqTranscriber {
    http_client: Client,
    config_manager: Arc<ConfigManager>,
}

impl GroqTranscriber {
    pub fn new(http_client: Client, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            http_client,
            config_manager,
        }
    }
}

pub fn build_form(request: TranscriptionRequest) -> Result<Form, reqwest::Error> {
    let file_part = Part::bytes(request.audio.data.to_vec())
        .file_name(UPLOAD_FILE_NAME)
        .mime_str(UPLOAD_CONTENT_TYPE)?;

    Ok(Form::new()
        .part("file", file_part)
        .text("model", request.model)
        .text("language", request.language)
        .text("response_format", "json")
        .text("temperature", "0"))
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(
        &self,
        api_key: &str,
        request: TranscriptionRequest,
    ) -> Result<Transcription, TranscriptionError> {
        let settings = self.config_manager.get_config().await.transcription;
        let url = format!(
            "{}/audio/transcriptions",
            settings.base_url.trim_end_matches('/')
        );

        debug!(
            "Sending {} bytes to {} with model {}",
            request.audio.len(),
            url,
            request.model
        );

        let form = build_form(request)?;
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Transcription service returned {}: {}", status, body);
            return Err(TranscriptionError::Upstream { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<Transcription>(&bytes)
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))
    }
}
