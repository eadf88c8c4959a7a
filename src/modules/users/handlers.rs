use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::models::{NewNotification, NotificationType, UpdateUserStatus, User, UserRole};
use crate::db::repositories::{NotificationRepository, UserRepository};
use crate::error::AppResult;

pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<User>>> {
    user.require_any(&[UserRole::Admin])?;

    let users = UserRepository::list(&state.db).await?;
    Ok(Json(users))
}

pub async fn update_user_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatus>,
) -> AppResult<Json<serde_json::Value>> {
    user.require_any(&[UserRole::Admin])?;

    let updated = UserRepository::update_status(&state.db, user_id, payload.status).await?;

    tracing::info!(user_id = %updated.id, status = ?updated.status, "Account status changed");

    let notification = NotificationRepository::create(
        &state.db,
        &NewNotification {
            user_id: updated.id,
            notification_type: NotificationType::AccountStatus,
            title: "Account status updated".to_string(),
            message: "Your account status has been changed by an administrator".to_string(),
            reference_id: None,
        },
    )
    .await?;
    if let Ok(value) = serde_json::to_value(&notification) {
        state.push_notification(&value);
    }

    Ok(Json(json!({ "message": "User status updated successfully" })))
}
