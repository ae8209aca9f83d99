use serde::Serialize;

/// The transcription service does not report confidence, so a fixed value is returned.
pub const CONFIDENCE_PLACEHOLDER: f64 = 0.95;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    pub success: bool,
    pub original: String,
    pub bengali: String,
    pub detected_language: String,
    pub confidence: f64,
    pub timestamp: String,
    pub model: String,
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub success: bool,
    pub message: String,
    pub api_key_present: bool,
    pub timestamp: String,
}

/// RFC 3339 UTC timestamp with millisecond precision, used by every response that carries one.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transcription_response_uses_camel_case_and_null_duration() {
        let response = TranscriptionResponse {
            success: true,
            original: "Hello".to_string(),
            bengali: "হ্যালো".to_string(),
            detected_language: "unknown".to_string(),
            confidence: CONFIDENCE_PLACEHOLDER,
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            model: "whisper-large-v3".to_string(),
            duration: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["detectedLanguage"], json!("unknown"));
        assert_eq!(value["duration"], json!(null));
        assert_eq!(value["confidence"], json!(0.95));
    }

    #[test]
    fn test_timestamp_is_utc() {
        assert!(now_timestamp().ends_with('Z'));
    }
}
