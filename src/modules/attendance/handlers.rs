use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::checkin;
use crate::db::models::{AttendanceWithAttendee, UserRole};
use crate::db::repositories::AttendanceRepository;
use crate::error::AppResult;

const MANAGER_ROLES: &[UserRole] = &[UserRole::EventManager, UserRole::Admin];

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub token: String,
}

pub async fn check_in(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<serde_json::Value>> {
    user.require_any(MANAGER_ROLES)?;

    let receipt = checkin::check_in(&state.db, &payload.token, &user).await?;

    tracing::info!(
        registration_id = %receipt.registration_id,
        scanned_by = %user.id,
        "Attendee checked in"
    );

    Ok(Json(json!({ "success": true, "message": "Check-in successful" })))
}

pub async fn list_event_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<AttendanceWithAttendee>>> {
    user.require_any(MANAGER_ROLES)?;

    let records = AttendanceRepository::list_for_event(&state.db, event_id).await?;
    Ok(Json(records))
}
