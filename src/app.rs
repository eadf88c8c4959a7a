use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        attendance::routes::attendance_routes, auth::routes::auth_routes,
        events::routes::event_routes, notifications::routes::notification_routes,
        users::routes::user_routes,
    },
    websocket::websocket_routes,
};

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/events", event_routes())
        .nest("/users", user_routes())
        .nest("/notifications", notification_routes())
        .nest("/attendance", attendance_routes());

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .merge(websocket_routes())
        .nest("/api", api)
        .layer(middleware::from_fn(observability_middleware))
        // The SPA is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello() -> &'static str {
    "EMaS Backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let telemetry_health = crate::telemetry::telemetry_health_check();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
            "telemetry": telemetry_health
        }
    }))
}
