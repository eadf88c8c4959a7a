use crate::db::models::{Registration, RegistrationWithAttendee};
use crate::db::{unique_violation, DatabaseError};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct RegistrationRepository;

impl RegistrationRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
        checkin_token: &str,
    ) -> Result<Registration, DatabaseError> {
        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO event_registrations (id, event_id, user_id, checkin_token, status)
            VALUES ($1, $2, $3, $4, 'registered')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(checkin_token)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if unique_violation(&e, "event_registrations_event_user_key") {
                DatabaseError::Duplicate
            } else {
                DatabaseError::Sqlx(e)
            }
        })
    }

    pub async fn find_by_token(
        tx: &mut Transaction<'_, Postgres>,
        checkin_token: &str,
    ) -> Result<Option<Registration>, DatabaseError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations WHERE checkin_token = $1",
        )
        .bind(checkin_token)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(registration)
    }

    pub async fn find_by_event_and_user(
        pool: &PgPool,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>, DatabaseError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT * FROM event_registrations WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(registration)
    }

    pub async fn list_for_event(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<RegistrationWithAttendee>, DatabaseError> {
        let registrations = sqlx::query_as::<_, RegistrationWithAttendee>(
            r#"
            SELECT r.id, r.event_id, r.user_id, r.status, r.registered_at,
                   u.name, u.email, u.student_id, u.faculty
            FROM event_registrations r
            JOIN users u ON r.user_id = u.id
            WHERE r.event_id = $1
            ORDER BY r.registered_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(registrations)
    }

    pub async fn mark_attended(
        tx: &mut Transaction<'_, Postgres>,
        registration_id: Uuid,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE event_registrations SET status = 'attended' WHERE id = $1")
            .bind(registration_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
