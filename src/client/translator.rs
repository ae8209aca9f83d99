use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::config_manager::ConfigManager;

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("translation service returned {0}")]
    Status(StatusCode),
    #[error("unexpected translation response shape")]
    UnexpectedShape,
}

/// Text translation backend. Source language is auto-detected.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// Client for the public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    http_client: Client,
    config_manager: Arc<ConfigManager>,
}

impl GoogleTranslator {
    pub fn new(http_client: Client, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            http_client,
            config_manager,
        }
    }
}

/// Pulls the first translated segment out of `[[["translated", "source", ...], ...], ...]`.
pub fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    body.get(0)
        .and_then(|sentences| sentences.get(0))
        .and_then(|segment| segment.get(0))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(TranslationError::UnexpectedShape)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let settings = self.config_manager.get_config().await.translation;

        // `query` URL-encodes the text
        let response = self
            .http_client
            .get(&settings.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", settings.source_language.as_str()),
                ("tl", settings.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(Duration::from_secs(settings.timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status));
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use axum::extract::{RawQuery, State};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Mutex;

    type SeenQuery = Arc<Mutex<Option<String>>>;

    async fn answer_with_translation(
        State(seen): State<SeenQuery>,
        RawQuery(query): RawQuery,
    ) -> Json<Value> {
        *seen.lock().unwrap() = query;
        Json(json!([[["শুভ সকাল এবং বিদায়", "Good morning & bye", null, null, 10]], null, "en"]))
    }

    async fn answer_with_error() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable").into_response()
    }

    async fn answer_with_object() -> Json<Value> {
        Json(json!({"sentences": []}))
    }

    /// Serves `router` on an ephemeral local port and returns the endpoint URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/translate_a/single", addr)
    }

    fn translator_for(base_url: String) -> GoogleTranslator {
        let mut config = Config::default();
        config.translation.base_url = base_url;
        let client = Client::builder().no_proxy().build().unwrap();
        GoogleTranslator::new(client, Arc::new(ConfigManager::from_config(config)))
    }

    #[tokio::test]
    async fn test_translate_sends_gtx_query() {
        let seen: SeenQuery = Arc::default();
        let url = serve(
            Router::new()
                .route("/translate_a/single", get(answer_with_translation))
                .with_state(seen.clone()),
        )
        .await;

        let translated = translator_for(url)
            .translate("Good morning & bye")
            .await
            .unwrap();
        assert_eq!(translated, "শুভ সকাল এবং বিদায়");

        let query = seen.lock().unwrap().clone().unwrap();
        assert_eq!(query, "client=gtx&sl=auto&tl=bn&dt=t&q=Good+morning+%26+bye");
    }

    #[tokio::test]
    async fn test_translate_reports_non_success_status() {
        let url = serve(Router::new().route("/translate_a/single", get(answer_with_error))).await;

        let err = translator_for(url).translate("Hello").await.unwrap_err();
        match err {
            TranslationError::Status(status) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_rejects_unexpected_body() {
        let url = serve(Router::new().route("/translate_a/single", get(answer_with_object))).await;

        let err = translator_for(url).translate("Hello").await.unwrap_err();
        assert!(matches!(err, TranslationError::UnexpectedShape));
    }

    #[test]
    fn test_parse_translation_takes_first_segment() {
        let body = json!([
            [["হ্যালো বিশ্ব", "Hello world", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "হ্যালো বিশ্ব");
    }

    #[test]
    fn test_parse_translation_only_first_of_many_segments() {
        let body = json!([[["এক। ", "One. "], ["দুই।", "Two."]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "এক। ");
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shapes() {
        for body in [
            json!({"translation": "x"}),
            json!([]),
            json!([[]]),
            json!([[[42]]]),
            json!([[[""]]]),
            json!(null),
        ] {
            assert!(matches!(
                parse_translation(&body),
                Err(TranslationError::UnexpectedShape)
            ));
        }
    }
}
