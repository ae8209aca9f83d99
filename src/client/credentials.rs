/// Source of the transcription service credential.
///
/// Read on every request so a missing key is reported to the caller instead of
/// failing at startup.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Option<String>;

    /// Where the key is expected to come from, used in setup guidance.
    fn source(&self) -> &str;
}

/// Reads the key from a process environment variable.
pub struct EnvCredentialProvider {
    var_name: String,
}

impl EnvCredentialProvider {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var_name)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    fn source(&self) -> &str {
        &self.var_name
    }
}

/// Fixed key, or none at all.
pub struct StaticCredentialProvider {
    key: Option<String>,
    source: String,
}

impl StaticCredentialProvider {
    pub fn new(key: Option<String>, source: impl Into<String>) -> Self {
        Self {
            key,
            source: source.into(),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn api_key(&self) -> Option<String> {
        self.key.clone().filter(|key| !key.trim().is_empty())
    }

    fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_provider_reads_variable() {
        let var = "BANGLA_TRANSCRIBE_TEST_KEY_PRESENT";
        std::env::set_var(var, "gsk_test");
        let provider = EnvCredentialProvider::new(var);
        assert_eq!(provider.api_key().as_deref(), Some("gsk_test"));
        assert_eq!(provider.source(), var);
        std::env::remove_var(var);
    }

    #[test]
    fn test_env_provider_treats_blank_as_missing() {
        let var = "BANGLA_TRANSCRIBE_TEST_KEY_BLANK";
        std::env::set_var(var, "   ");
        assert_eq!(EnvCredentialProvider::new(var).api_key(), None);
        std::env::remove_var(var);
        assert_eq!(EnvCredentialProvider::new(var).api_key(), None);
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticCredentialProvider::new(Some("key".to_string()), "GROQ_API_KEY");
        assert_eq!(provider.api_key().as_deref(), Some("key"));
        assert_eq!(StaticCredentialProvider::new(None, "X").api_key(), None);
    }
}
