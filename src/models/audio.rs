use axum::body::Bytes;

/// Audio clip extracted from an upload.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    pub data: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl AudioPayload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// What the handler asks the transcription service for.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub audio: AudioPayload,
    pub model: String,
    pub language: String,
}

/// Transcription service result.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Transcription {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}
