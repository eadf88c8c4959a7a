use crate::db::models::{AttendanceRecord, AttendanceWithAttendee};
use crate::db::{unique_violation, DatabaseError};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct AttendanceRepository;

impl AttendanceRepository {
    /// Insert the one-and-only attendance record for a registration.
    ///
    /// Concurrent scans of the same token race on the
    /// `attendance_records_registration_key` constraint; every loser surfaces
    /// as `Duplicate`, never as a second record.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        registration_id: Uuid,
        scanned_by: Uuid,
    ) -> Result<AttendanceRecord, DatabaseError> {
        sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (id, registration_id, scanned_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(registration_id)
        .bind(scanned_by)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if unique_violation(&e, "attendance_records_registration_key") {
                DatabaseError::Duplicate
            } else {
                DatabaseError::Sqlx(e)
            }
        })
    }

    pub async fn list_for_event(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<AttendanceWithAttendee>, DatabaseError> {
        let records = sqlx::query_as::<_, AttendanceWithAttendee>(
            r#"
            SELECT a.id, a.registration_id, a.scanned_by, a.check_in_time,
                   r.user_id, u.name, u.student_id
            FROM attendance_records a
            JOIN event_registrations r ON a.registration_id = r.id
            JOIN users u ON r.user_id = u.id
            WHERE r.event_id = $1
            ORDER BY a.check_in_time DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }
}
