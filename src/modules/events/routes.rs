use super::handlers::{
    create_event, delete_event, get_event, list_events, list_feedback, list_registrations, my_qr,
    register_for_event, submit_feedback, update_event,
};
use crate::app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/:id/register", post(register_for_event))
        .route("/:id/registrations", get(list_registrations))
        .route("/:id/my-qr", get(my_qr))
        .route("/:id/feedback", post(submit_feedback).get(list_feedback))
}
