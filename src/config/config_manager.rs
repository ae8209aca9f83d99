use super::types::Config;
use notify::{
    recommended_watcher, Event, RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub struct ConfigManager {
    config: Arc<RwLock<Config>>,
    _watcher: Option<RecommendedWatcher>, // Keep watcher alive
}

impl ConfigManager {
    /// Wraps an already loaded config and starts watching `config_path` for changes.
    ///
    /// A watcher that cannot be started only costs hot reload, so it is logged and skipped.
    pub async fn new(config_path: &str, initial: Config) -> Self {
        let config_arc = Arc::new(RwLock::new(initial));

        let watcher = match Self::setup_watcher(config_path, config_arc.clone()).await {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Config hot reload disabled for {}: {}", config_path, e);
                None
            }
        };

        ConfigManager {
            config: config_arc,
            _watcher: watcher,
        }
    }

    /// Static config without a file watcher.
    pub fn from_config(config: Config) -> Self {
        ConfigManager {
            config: Arc::new(RwLock::new(config)),
            _watcher: None,
        }
    }

    pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`ConfigManager::load_config`], but a missing file yields the defaults.
    pub fn load_or_default(config_path: &str) -> Result<Config, ConfigError> {
        if Path::new(config_path).exists() {
            Self::load_config(config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub async fn get_config(&self) -> Config {
        self.config.read().await.clone()
    }

    async fn setup_watcher(
        config_path_str: &str,
        config: Arc<RwLock<Config>>,
    ) -> NotifyResult<RecommendedWatcher> {
        let config_path_for_check = config_path_str.to_string();

        // Capture the runtime handle to submit tasks from the non-async watcher thread
        let runtime_handle = tokio::runtime::Handle::current();

        let mut watcher = recommended_watcher(move |res: NotifyResult<Event>| match res {
            Ok(event) => {
                // Editors often save to a temp file and rename, so match loosely
                if event
                    .paths
                    .iter()
                    .any(|p| p.to_string_lossy().contains(&config_path_for_check))
                {
                    info!("Config file changed, reloading...");
                    std::thread::sleep(std::time::Duration::from_millis(100));

                    match Self::load_config(&config_path_for_check) {
                        Ok(new_config) => {
                            let config_clone = config.clone();
                            runtime_handle.spawn(async move {
                                *config_clone.write().await = new_config;
                                info!("Config reloaded successfully.");
                            });
                        }
                        Err(e) => {
                            error!("Failed to reload config: {}", e);
                        }
                    }
                }
            }
            Err(e) => error!("watch error: {:?}", e),
        })?;

        // Watch the parent directory to handle atomic saves (rename/move)
        let path_to_watch = match Path::new(config_path_str).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        watcher.watch(path_to_watch, RecursiveMode::NonRecursive)?;

        info!(
            "Started watching config file directory: {:?}",
            path_to_watch
        );
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ConfigManager::load_or_default("does/not/exist.yaml").unwrap();
        assert_eq!(config.transcription.model, "whisper-large-v3");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = std::env::temp_dir().join(format!("bangla-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        fs::write(&path, "server: [not, a, map").unwrap();

        let result = ConfigManager::load_or_default(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Yaml(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_from_config_serves_given_values() {
        let mut config = Config::default();
        config.transcription.model = "distil-whisper".to_string();
        let manager = ConfigManager::from_config(config);
        assert_eq!(manager.get_config().await.transcription.model, "distil-whisper");
    }
}
