use axum::{body::Body, extract::ConnectInfo, http::Request, middleware::Next, response::Response};
use chrono::{DateTime, Local};
use std::fmt;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::handlers::utils::{get_client_ip, redact_bearer};
use crate::models::AccessLogMeta;

/// One access log line, roughly the Nginx combined format plus latency, model,
/// redacted key and error text.
pub struct AccessLogEntry {
    pub client_ip: String,
    pub time: DateTime<Local>,
    pub request_line: String,
    pub status: u16,
    pub body_bytes: String,
    pub user_agent: String,
    pub latency: Duration,
    pub model: String,
    pub api_key: String,
    pub error: String,
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - - [{}] \"{}\" {} {} \"-\" \"{}\" {:.3}s \"{}\" \"{}\" {:?}",
            self.client_ip,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line,
            self.status,
            self.body_bytes,
            self.user_agent,
            self.latency.as_secs_f64(),
            self.model,
            self.api_key,
            self.error
        )
    }
}

/// Logs every request under the `access_log` target; 4xx/5xx at error level.
pub async fn access_log_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let time = Local::now();

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let client_ip = get_client_ip(req.headers(), peer);
    let api_key = redact_bearer(req.headers());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let request_line = format!("{} {} {:?}", req.method(), req.uri(), req.version());

    let response = next.run(req).await;

    let meta = response.extensions().get::<AccessLogMeta>();
    let entry = AccessLogEntry {
        client_ip,
        time,
        request_line,
        status: response.status().as_u16(),
        body_bytes: response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string(),
        user_agent,
        latency: start.elapsed(),
        model: meta.map_or_else(|| "-".to_string(), |m| m.model.clone()),
        api_key,
        error: meta
            .and_then(|m| m.error.clone())
            .unwrap_or_else(|| "-".to_string()),
    };

    if response.status().is_client_error() || response.status().is_server_error() {
        error!(target: "access_log", "{}", entry);
    } else {
        info!(target: "access_log", "{}", entry);
    }

    response
}
