use super::handlers::{check_in, list_event_attendance};
use crate::app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/event/:eventId", get(list_event_attendance))
}
