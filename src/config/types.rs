use serde::{Deserialize, Serialize};

pub const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub transcription: TranscriptionConfig,
    pub translation: TranslationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Upper bound on the raw request body, before transport decoding.
    pub max_body_bytes: usize,
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8888,
            max_body_bytes: 48 * MIB,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// OpenAI-compatible API root, `/audio/transcriptions` is appended.
    pub base_url: String,
    pub model: String,
    pub language: String,
    /// Name of the environment variable holding the bearer credential.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_audio_bytes: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "whisper-large-v3".to_string(),
            language: "bn".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 120,
            max_audio_bytes: 25 * MIB,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub base_url: String,
    pub source_language: String,
    pub target_language: String,
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://translate.googleapis.com/translate_a/single".to_string(),
            source_language: "auto".to_string(),
            target_language: "bn".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub general_log_retention_days: usize,
    pub error_log_retention_days: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            general_log_retention_days: 10,
            error_log_retention_days: 30,
        }
    }
}
