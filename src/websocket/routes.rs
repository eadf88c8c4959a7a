use super::ws_handler::ws_handler;
use crate::app_state::AppState;
use axum::{routing::get, Router};

pub fn websocket_routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}
