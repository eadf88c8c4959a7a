use crate::db::models::{EventFeedback, FeedbackWithAuthor, NewFeedback};
use crate::db::{unique_violation, DatabaseError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct FeedbackRepository;

impl FeedbackRepository {
    pub async fn create(
        pool: &PgPool,
        event_id: Uuid,
        user_id: Uuid,
        data: &NewFeedback,
    ) -> Result<EventFeedback, DatabaseError> {
        sqlx::query_as::<_, EventFeedback>(
            r#"
            INSERT INTO event_feedback (id, event_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if unique_violation(&e, "event_feedback_event_user_key") {
                DatabaseError::Duplicate
            } else {
                DatabaseError::Sqlx(e)
            }
        })
    }

    pub async fn list_for_event(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<FeedbackWithAuthor>, DatabaseError> {
        let feedback = sqlx::query_as::<_, FeedbackWithAuthor>(
            r#"
            SELECT f.id, f.event_id, f.user_id, f.rating, f.comment, f.submitted_at, u.name
            FROM event_feedback f
            JOIN users u ON f.user_id = u.id
            WHERE f.event_id = $1
            ORDER BY f.submitted_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(feedback)
    }
}
