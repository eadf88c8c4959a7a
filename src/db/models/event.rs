use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub time: String,
    pub venue: String,
    pub category: String,
    pub capacity: i32,
    pub registered_count: i32,
    pub image_url: Option<String>,
    pub organizer: String,
    pub created_by: Uuid,
    pub status: EventStatus,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub date: Date,
    pub time: String,
    #[validate(length(min = 1))]
    pub venue: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub organizer: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub date: Date,
    pub time: String,
    #[validate(length(min = 1))]
    pub venue: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub organizer: String,
    pub status: EventStatus,
}

/// Optional list filters, straight from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub category: Option<String>,
}
