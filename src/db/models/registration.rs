use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Attended,
}

/// One user's claim on one seat of an event. `checkin_token` is the opaque
/// value embedded in the attendee's personal QR code; only the check-in
/// validator moves `status` to `Attended`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub checkin_token: String,
    pub status: RegistrationStatus,
    pub registered_at: OffsetDateTime,
}

/// Registration joined with attendee identity, for the manager's roster view.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RegistrationWithAttendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: RegistrationStatus,
    pub registered_at: OffsetDateTime,
    pub name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub faculty: Option<String>,
}
