use anyhow::Context;
use dotenv::dotenv;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::info;

use emas_backend::{app, app_state::AppState, config, db, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init()?;

    let telemetry = telemetry::init_telemetry(None).await?;

    let pool = db::init_pool()
        .await
        .context("Failed to initialize database")?;

    let (ws_tx, _) = broadcast::channel(128);
    let state = AppState::new(pool, config.clone(), Arc::new(Mutex::new(ws_tx)));

    let app = app::create_router(state);

    let addr = config.server_addr();
    info!("{} listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await?;

    Ok(())
}
