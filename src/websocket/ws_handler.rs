use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use crate::app_state::AppState;

/// Push channel for notification events. Clients only receive; inbound
/// frames are drained solely to observe the close handshake.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: axum::extract::ws::WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let mut rx = state.ws_tx.lock().unwrap().subscribe();

    let recv_task = tokio::spawn(async move { while let Some(Ok(_)) = receiver.next().await {} });

    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Either task ending means the connection is done.
    tokio::select! {
        _ = recv_task => {},
        _ = send_task => {},
    }
}
