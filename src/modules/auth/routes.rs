use super::handlers::{login, me, register, update_profile};
use crate::app_state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
}
