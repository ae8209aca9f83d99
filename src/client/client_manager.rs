use crate::config::types::ServerConfig;
use reqwest::Client;
use std::time::Duration;

/// Owns the HTTP connection pool shared by the upstream clients.
///
/// Per-call timeouts are set on each request, only the connect timeout lives here.
pub struct ClientManager {
    client: Client,
}

impl ClientManager {
    pub fn new(server: &ServerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(server.connect_timeout_secs))
            .build()?;
        Ok(ClientManager { client })
    }

    pub fn get_client(&self) -> Client {
        self.client.clone()
    }
}
