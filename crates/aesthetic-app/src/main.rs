//! Aesthetic — image filter editor backend.
//!
//! Serves the editing session to the web UI over a WebSocket IPC bridge.
//! The UI previews with the CSS filter string it receives; exports are
//! rendered here at the image's native size.

mod config;
mod error;
mod export;
mod image_loader;
mod image_slot;
mod ipc;
mod notify;
mod session;
mod ws_bridge;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::ipc::AppToUi;
use crate::session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=aesthetic_app=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = AppConfig::default();
    tracing::debug!(?config, "configuration loaded");

    let (to_ui_tx, to_ui_rx) = mpsc::unbounded_channel::<AppToUi>();
    let (from_ui_tx, from_ui_rx) = mpsc::unbounded_channel::<String>();

    let session = Session::new(config.clone(), to_ui_tx);
    if let Some(path) = config.initial_image.clone() {
        session.load_file(path);
    }

    let listener = TcpListener::bind(("127.0.0.1", config.ws_port)).await?;
    tokio::spawn(ws_bridge::serve(listener, from_ui_tx, to_ui_rx));

    ws_bridge::run_session(session, from_ui_rx).await;
    Ok(())
}
