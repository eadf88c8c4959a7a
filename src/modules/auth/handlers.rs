use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{jwt, password, AuthUser};
use crate::db::models::{NewUser, UpdateProfile, User, UserLogin, UserStatus};
use crate::db::repositories::UserRepository;
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    // Same message for unknown email and bad password.
    let user = UserRepository::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    if !password::verify(&payload.password, &user.password_hash).await? {
        return Err(AppError::Authentication(
            "Invalid email or password".to_string(),
        ));
    }

    match user.status {
        UserStatus::Pending => {
            return Err(AppError::Authorization(
                "Your account is awaiting approval from an administrator".to_string(),
            ))
        }
        UserStatus::Suspended => {
            return Err(AppError::Authorization(
                "Your account has been suspended. Please contact support.".to_string(),
            ))
        }
        UserStatus::Active => {}
    }

    UserRepository::touch_last_login(&state.db, user.id).await?;

    let auth = &state.env.auth;
    let token = jwt::issue(&user, &auth.jwt_secret, auth.token_ttl_hours)?;

    Ok(Json(LoginResponse { user, token }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let password_hash = password::hash(&payload.password).await?;

    let user = match UserRepository::create(&state.db, &payload, &password_hash).await {
        Ok(user) => user,
        Err(DatabaseError::Duplicate) => {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "New account registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful", "user": user })),
    ))
}

pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<User>> {
    let user = UserRepository::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfile>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let user = UserRepository::update_profile(&state.db, user.id, &payload).await?;
    Ok(Json(user))
}
