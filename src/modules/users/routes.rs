use super::handlers::{list_users, update_user_status};
use crate::app_state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/status", put(update_user_status))
}
