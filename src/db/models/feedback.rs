use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EventFeedback {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewFeedback {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    pub comment: Option<String>,
}

/// Feedback joined with the author's name for the event detail page.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FeedbackWithAuthor {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub submitted_at: OffsetDateTime,
    pub name: String,
}
