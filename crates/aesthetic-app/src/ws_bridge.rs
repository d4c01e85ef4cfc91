//! WebSocket IPC bridge between the session and the web UI.
//!
//! The socket task only moves JSON text; all parsing and state changes happen
//! in [`run_session`], which owns the [`Session`] and therefore the single
//! `FilterState`.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::ipc::{AppToUi, UiToApp};
use crate::notify::Notification;
use crate::session::Session;

/// Accept UI clients one at a time and shuttle messages.
///
/// Inbound text frames go to `inbound_tx`. Outbound messages are serialized
/// and written to whichever client is connected; they queue while none is.
pub async fn serve(
    listener: TcpListener,
    inbound_tx: mpsc::UnboundedSender<String>,
    mut outbound_rx: mpsc::UnboundedReceiver<AppToUi>,
) {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("WebSocket IPC server listening on ws://{addr}");
    }

    // Accept connections in a loop, but only one client at a time.
    // When a client disconnects, we accept the next one.
    loop {
        let Ok((stream, peer)) = listener.accept().await else {
            continue;
        };
        tracing::info!("WebSocket client connected: {peer}");

        let ws_stream = match tokio_tungstenite::accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                tracing::error!("WebSocket handshake failed: {e}");
                continue;
            }
        };

        let (mut ws_sink, mut ws_source) = ws_stream.split();
        let tx = inbound_tx.clone();

        // Forward incoming WS messages to the session
        let recv_handle = tokio::spawn(async move {
            while let Some(Ok(msg)) = ws_source.next().await {
                if let Message::Text(text) = msg
                    && tx.send(text.to_string()).is_err()
                {
                    break;
                }
            }
        });

        // Pin the JoinHandle so select! can poll it by &mut ref.
        tokio::pin!(recv_handle);
        loop {
            tokio::select! {
                result = &mut recv_handle => {
                    // Client disconnected (recv task ended)
                    let _ = result;
                    break;
                }
                msg = outbound_rx.recv() => {
                    let Some(msg) = msg else {
                        tracing::info!("Session closed, stopping WebSocket server");
                        return;
                    };
                    let json = match serde_json::to_string(&msg) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize AppToUi: {e}");
                            continue;
                        }
                    };
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("WebSocket client disconnected");
    }
}

/// Drive the session from inbound JSON until the bridge goes away.
pub async fn run_session(mut session: Session, mut inbound_rx: mpsc::UnboundedReceiver<String>) {
    while let Some(json) = inbound_rx.recv().await {
        handle_json(&mut session, &json);
    }
}

/// Parse one inbound frame and dispatch it. Malformed frames are reported
/// to the UI and otherwise ignored.
pub fn handle_json(session: &mut Session, json: &str) {
    match serde_json::from_str::<UiToApp>(json) {
        Ok(msg) => session.dispatch(msg),
        Err(e) => {
            tracing::warn!("Failed to parse UI message: {e}");
            session.send_notification(Notification::error(format!("Malformed request: {e}")));
        }
    }
}
