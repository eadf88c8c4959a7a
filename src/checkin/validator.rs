use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::token;
use crate::auth::AuthUser;
use crate::db::repositories::{AttendanceRepository, RegistrationRepository};
use crate::db::DatabaseError;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct CheckInReceipt {
    pub attendance_id: Uuid,
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub attendee_user_id: Uuid,
}

/// Record attendance for a scanned payload. The only code path that creates
/// an attendance record.
///
/// Resolution, insertion and the status transition share one transaction.
/// Duplicate-scan detection is the storage constraint itself, so N
/// concurrent scans of one token produce exactly one record and N-1
/// `AlreadyCheckedIn` responses. The event's registered count is not
/// touched here; it only moves at registration time.
pub async fn check_in(
    pool: &PgPool,
    payload: &str,
    actor: &AuthUser,
) -> Result<CheckInReceipt, AppError> {
    let checkin_token =
        token::parse(payload).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    let registration = RegistrationRepository::find_by_token(&mut tx, checkin_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid QR code".to_string()))?;

    let record = match AttendanceRepository::create(&mut tx, registration.id, actor.id).await {
        Ok(record) => record,
        Err(DatabaseError::Duplicate) => return Err(AppError::AlreadyCheckedIn),
        Err(e) => return Err(e.into()),
    };

    RegistrationRepository::mark_attended(&mut tx, registration.id).await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(CheckInReceipt {
        attendance_id: record.id,
        registration_id: registration.id,
        event_id: registration.event_id,
        attendee_user_id: registration.user_id,
    })
}
