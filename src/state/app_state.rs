use crate::client::credentials::CredentialProvider;
use crate::client::transcriber::Transcriber;
use crate::client::translator::Translator;
use crate::config::config_manager::ConfigManager;
use std::sync::Arc;

pub struct AppState {
    pub config_manager: Arc<ConfigManager>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub transcriber: Arc<dyn Transcriber>,
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        credentials: Arc<dyn CredentialProvider>,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        AppState {
            config_manager,
            credentials,
            transcriber,
            translator,
        }
    }
}
