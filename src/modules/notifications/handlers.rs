use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::models::Notification;
use crate::db::repositories::NotificationRepository;
use crate::error::{AppError, AppResult};

pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepository::list_for_user(&state.db, user.id).await?;
    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = NotificationRepository::mark_read(&state.db, notification_id, user.id).await?;
    if !updated {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(json!({ "message": "Notification marked as read" })))
}
