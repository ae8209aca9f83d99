use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

use crate::app_error::AppError;
use crate::models::audio::AudioPayload;

const HEADER_CONTENT_TRANSFER_ENCODING: &str = "content-transfer-encoding";

/// Field names accepted as the audio part when no part carries a file name.
const AUDIO_FIELD_NAMES: [&str; 2] = ["audio", "file"];

pub fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub fn is_multipart_form_data(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| {
            m.type_().as_str().eq_ignore_ascii_case("multipart")
                && m.subtype().as_str().eq_ignore_ascii_case("form-data")
        })
        .unwrap_or(false)
}

/// True for a JSON object body with `"test": true`.
pub fn is_connectivity_probe(body: &Bytes) -> bool {
    let starts_like_object = body
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');
    if !starts_like_object {
        return false;
    }

    // simd-json needs a mutable buffer
    let mut buf = body.to_vec();
    match simd_json::from_slice::<Value>(&mut buf) {
        Ok(value) => value.get("test").and_then(Value::as_bool) == Some(true),
        Err(_) => false,
    }
}

/// Undoes gateway transport encoding: base64 when the request says so, raw otherwise.
pub fn decode_transport(headers: &HeaderMap, body: Bytes) -> Result<Bytes, AppError> {
    let is_base64 = headers
        .get(HEADER_CONTENT_TRANSFER_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("base64"));

    if !is_base64 {
        return Ok(body);
    }

    let compact: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    general_purpose::STANDARD
        .decode(compact)
        .map(Bytes::from)
        .map_err(|e| AppError::InvalidBody(format!("body is not valid base64: {}", e)))
}

/// Finds the audio part of a multipart body.
///
/// The first non-empty part with a file name wins, otherwise the first
/// non-empty part named `audio` or `file`.
pub async fn extract_audio(content_type: &str, body: Bytes) -> Result<AudioPayload, AppError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| AppError::InvalidBody(format!("invalid multipart boundary: {}", e)))?;

    let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut named_fallback: Option<AudioPayload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidBody(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let field_content_type = field.content_type().map(|m| m.to_string());

        let is_file = file_name.is_some();
        let is_audio_field = AUDIO_FIELD_NAMES.contains(&name.as_str());
        if !is_file && (!is_audio_field || named_fallback.is_some()) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidBody(format!("failed to read field data: {}", e)))?;

        let payload = AudioPayload {
            data,
            file_name,
            content_type: field_content_type,
        };

        if payload.is_empty() {
            continue;
        }
        if is_file {
            return Ok(payload);
        }
        named_fallback = Some(payload);
    }

    named_fallback.ok_or(AppError::MissingAudio)
}
