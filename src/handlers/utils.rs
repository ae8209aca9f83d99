use axum::http::HeaderMap;
use std::any::Any;
use std::net::SocketAddr;

const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";
const HEADER_X_REAL_IP: &str = "x-real-ip";

/// Client IP for logging.
///
/// Lookup order:
/// 1. `X-Forwarded-For`, first entry
/// 2. `X-Real-IP`
/// 3. the TCP peer address
pub fn get_client_ip(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(xff) = headers.get(HEADER_X_FORWARDED_FOR) {
        if let Ok(xff_str) = xff.to_str() {
            let raw_ip = xff_str.split(',').next().unwrap_or(xff_str).trim();
            return clean_ip(raw_ip);
        }
    }

    if let Some(xri) = headers.get(HEADER_X_REAL_IP) {
        if let Ok(xri_str) = xri.to_str() {
            return clean_ip(xri_str.trim());
        }
    }

    if let Some(addr) = addr {
        return clean_ip(&addr.ip().to_string());
    }

    "unknown".to_string()
}

/// Strips the IPv4-mapped IPv6 prefix.
fn clean_ip(ip: &str) -> String {
    if let Some(ipv4) = ip.strip_prefix("::ffff:") {
        ipv4.to_string()
    } else {
        ip.to_string()
    }
}

/// Redacts a bearer token down to its first characters.
pub fn redact_bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s))
        .map(|s| {
            if s.len() > 10 {
                format!("{}...", s.chars().take(8).collect::<String>())
            } else {
                s.to_string()
            }
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Message carried by a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
