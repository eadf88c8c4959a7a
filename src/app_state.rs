use crate::config;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    /// Fan-out channel for notification pushes to connected websocket clients.
    pub ws_tx: Arc<Mutex<broadcast::Sender<String>>>,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config, ws_tx: Arc<Mutex<broadcast::Sender<String>>>) -> Self {
        Self { db, env, ws_tx }
    }

    /// Best-effort push; a send error only means nobody is connected.
    pub fn push_notification(&self, payload: &serde_json::Value) {
        if let Ok(tx) = self.ws_tx.lock() {
            let _ = tx.send(payload.to_string());
        }
    }
}
