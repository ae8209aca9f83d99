use axum::middleware as axum_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use bangla_transcribe::client::client_manager::ClientManager;
use bangla_transcribe::client::credentials::EnvCredentialProvider;
use bangla_transcribe::client::transcriber::GroqTranscriber;
use bangla_transcribe::client::translator::GoogleTranslator;
use bangla_transcribe::config::config_manager::ConfigManager;
use bangla_transcribe::state::app_state::AppState;
use bangla_transcribe::{logging, middleware, routes};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigManager::load_or_default(&config_path)?;

    // File + console logging
    let _guards = logging::init_logging(&config.logging)?;
    tracing::info!("Loaded configuration from {}", config_path);

    let client_manager = ClientManager::new(&config.server)?;
    let credentials = Arc::new(EnvCredentialProvider::new(
        config.transcription.api_key_env.clone(),
    ));
    let config_manager = Arc::new(ConfigManager::new(&config_path, config.clone()).await);

    let transcriber = Arc::new(GroqTranscriber::new(
        client_manager.get_client(),
        config_manager.clone(),
    ));
    let translator = Arc::new(GoogleTranslator::new(
        client_manager.get_client(),
        config_manager.clone(),
    ));

    let app_state = Arc::new(AppState::new(
        config_manager,
        credentials,
        transcriber,
        translator,
    ));

    let app = routes::create_router(app_state, config.server.max_body_bytes).layer(
        axum_middleware::from_fn(middleware::access_log::access_log_middleware),
    ); // Access log outermost

    let port = match std::env::var("SERVER_PORT") {
        Ok(value) => value.parse()?,
        Err(_) => config.server.port,
    };
    // Listen on IPv6 "any" address (::), which generally also supports IPv4 (dual-stack)
    let addr = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
