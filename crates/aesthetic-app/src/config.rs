//! Application configuration.

use std::path::PathBuf;
use std::str::FromStr;

/// Default WebSocket port for the UI bridge.
const DEFAULT_WS_PORT: u16 = 9400;
/// Largest upload accepted, in bytes.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
/// Longest side of server-rendered previews.
const DEFAULT_PREVIEW_MAX_DIM: u32 = 1024;

/// Runtime configuration, read from the environment with fallbacks.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebSocket port on 127.0.0.1 (`AESTHETIC_WS_PORT`).
    pub ws_port: u16,
    /// Upload size limit in bytes (`AESTHETIC_MAX_UPLOAD_BYTES`).
    pub max_upload_bytes: usize,
    /// Longest preview side in pixels (`AESTHETIC_PREVIEW_MAX_DIM`).
    pub preview_max_dim: u32,
    /// Image loaded at startup so the editor never opens empty
    /// (`AESTHETIC_INITIAL_IMAGE`).
    pub initial_image: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ws_port: parse_or(std::env::var("AESTHETIC_WS_PORT").ok(), DEFAULT_WS_PORT),
            max_upload_bytes: parse_or(
                std::env::var("AESTHETIC_MAX_UPLOAD_BYTES").ok(),
                DEFAULT_MAX_UPLOAD_BYTES,
            ),
            preview_max_dim: parse_or(
                std::env::var("AESTHETIC_PREVIEW_MAX_DIM").ok(),
                DEFAULT_PREVIEW_MAX_DIM,
            ),
            initial_image: std::env::var_os("AESTHETIC_INITIAL_IMAGE").map(PathBuf::from),
        }
    }
}

/// Parse an optional raw value, keeping `default` when it is absent or invalid.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
