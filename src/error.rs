use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // These two answer 400 on the wire; generic conflicts answer 409.
    #[error("Event is full")]
    EventFull,

    #[error("Already checked in")]
    AlreadyCheckedIn,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Database(err) => match err {
                DatabaseError::NotFound => {
                    (StatusCode::NOT_FOUND, "Resource not found".to_string())
                }
                DatabaseError::Duplicate => {
                    (StatusCode::CONFLICT, "Resource already exists".to_string())
                }
                DatabaseError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                // Internal detail stays in the logs.
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                ),
            },
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::EventFull => (StatusCode::BAD_REQUEST, "Event is full".to_string()),
            AppError::AlreadyCheckedIn => {
                (StatusCode::BAD_REQUEST, "Already checked in".to_string())
            }
            AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = ?self, "Request rejected");
        }

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_cases_keep_distinct_statuses() {
        let (full, _) = AppError::EventFull.status_and_message();
        let (dup, _) = AppError::AlreadyCheckedIn.status_and_message();
        let (conflict, _) = AppError::Conflict("Already registered for this event".into())
            .status_and_message();

        assert_eq!(full, StatusCode::BAD_REQUEST);
        assert_eq!(dup, StatusCode::BAD_REQUEST);
        assert_eq!(conflict, StatusCode::CONFLICT);
    }

    #[test]
    fn database_errors_stay_generic() {
        let (status, message) =
            AppError::Database(DatabaseError::ConnectionError("dsn".into())).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("dsn"));
    }

    #[test]
    fn each_taxonomy_case_has_its_own_message() {
        let messages: Vec<String> = [
            AppError::NotFound("Invalid QR code".into()),
            AppError::AlreadyCheckedIn,
            AppError::EventFull,
            AppError::Validation("Invalid QR code format".into()),
        ]
        .iter()
        .map(|e| e.status_and_message().1)
        .collect();

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
