//! URLs of the booking backend

use contracts::DEFAULT_API_PORT;

/// Base URL of the backend: same host as the page, port `DEFAULT_API_PORT`.
/// The backend reads its port from `config.toml`, which must keep the same value.
///
/// Empty when there is no window, so the paths stay relative.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname)
}

fn base_url(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

/// Full URL for an `/api/...` path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
