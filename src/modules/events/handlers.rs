use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::checkin::{self, qr, token};
use crate::db::models::{
    Event, EventFilter, FeedbackWithAuthor, NewEvent, NewFeedback, NewNotification,
    NotificationType, RegistrationWithAttendee, UpdateEvent, UserRole,
};
use crate::db::repositories::{
    EventRepository, FeedbackRepository, NotificationRepository, RegistrationRepository,
};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

const MANAGER_ROLES: &[UserRole] = &[UserRole::EventManager, UserRole::Admin];

pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepository::list(&state.db, &filter).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = EventRepository::find_by_id(&state.db, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<NewEvent>,
) -> AppResult<impl IntoResponse> {
    user.require_any(MANAGER_ROLES)?;
    payload.validate()?;

    let event = EventRepository::create(&state.db, &payload, user.id).await?;

    tracing::info!(event_id = %event.id, created_by = %user.id, "Event created");

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    user.require_any(MANAGER_ROLES)?;
    payload.validate()?;

    let event = EventRepository::update(&state.db, event_id, &payload).await?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    user.require_any(MANAGER_ROLES)?;

    match EventRepository::delete(&state.db, event_id).await {
        Ok(true) => Ok(Json(json!({ "message": "Event deleted successfully" }))),
        Ok(false) => Err(AppError::NotFound("Event not found".to_string())),
        Err(DatabaseError::Referenced) => Err(AppError::Conflict(
            "Event has registrations and cannot be deleted".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn register_for_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let registration = checkin::register(&state.db, event_id, user.id).await?;

    // Confirmation notification; the registration itself already committed.
    if let Some(event) = EventRepository::find_by_id(&state.db, event_id).await? {
        let notification = NotificationRepository::create(
            &state.db,
            &NewNotification {
                user_id: user.id,
                notification_type: NotificationType::RegistrationConfirmed,
                title: "Registration confirmed".to_string(),
                message: format!("You are registered for {}", event.title),
                reference_id: Some(event_id),
            },
        )
        .await?;
        if let Ok(payload) = serde_json::to_value(&notification) {
            state.push_notification(&payload);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Successfully registered for event",
            "qrCode": token::issue(&registration.checkin_token),
        })),
    ))
}

pub async fn list_registrations(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<RegistrationWithAttendee>>> {
    user.require_any(MANAGER_ROLES)?;

    let registrations = RegistrationRepository::list_for_event(&state.db, event_id).await?;
    Ok(Json(registrations))
}

/// PNG of the caller's own check-in QR code for this event.
pub async fn my_qr(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    let registration =
        RegistrationRepository::find_by_event_and_user(&state.db, event_id, user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not registered for this event".to_string()))?;

    let png = qr::render_png(&token::issue(&registration.checkin_token))
        .map_err(|e| AppError::InternalServerError(format!("Failed to render QR code: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<NewFeedback>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    if EventRepository::find_by_id(&state.db, event_id).await?.is_none() {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    match FeedbackRepository::create(&state.db, event_id, user.id, &payload).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Feedback submitted successfully" })),
        )),
        Err(DatabaseError::Duplicate) => Err(AppError::Conflict(
            "Feedback already submitted for this event".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_feedback(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<FeedbackWithAuthor>>> {
    let feedback = FeedbackRepository::list_for_event(&state.db, event_id).await?;
    Ok(Json(feedback))
}
