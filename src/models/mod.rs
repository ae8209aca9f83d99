pub mod audio;
pub mod responses;

/// Per-request details a handler hands to the access log through response extensions.
#[derive(Clone)]
pub struct AccessLogMeta {
    pub model: String,
    pub error: Option<String>,
}
