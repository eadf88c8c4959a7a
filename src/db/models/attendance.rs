use serde::Serialize;
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Proof of presence. Exactly one per registration, enforced by the
/// `attendance_records_registration_key` unique constraint; rows are never
/// updated after insertion.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub scanned_by: Uuid,
    pub check_in_time: OffsetDateTime,
}

/// Attendance record joined with attendee identity for the event roster.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AttendanceWithAttendee {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub scanned_by: Uuid,
    pub check_in_time: OffsetDateTime,
    pub user_id: Uuid,
    pub name: String,
    pub student_id: Option<String>,
}
