use crate::db::models::{Event, EventFilter, NewEvent, UpdateEvent};
use crate::db::DatabaseError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct EventRepository;

impl EventRepository {
    pub async fn create(
        pool: &PgPool,
        data: &NewEvent,
        created_by: Uuid,
    ) -> Result<Event, DatabaseError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (id, title, description, date, time, venue, category, capacity,
                 image_url, organizer, created_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'upcoming')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.time)
        .bind(&data.venue)
        .bind(&data.category)
        .bind(data.capacity)
        .bind(&data.image_url)
        .bind(&data.organizer)
        .bind(created_by)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    pub async fn find_by_id(pool: &PgPool, event_id: Uuid) -> Result<Option<Event>, DatabaseError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(pool)
            .await?;
        Ok(event)
    }

    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>, DatabaseError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE ($1::event_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY date ASC
            "#,
        )
        .bind(filter.status)
        .bind(&filter.category)
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    pub async fn update(
        pool: &PgPool,
        event_id: Uuid,
        data: &UpdateEvent,
    ) -> Result<Event, DatabaseError> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $1, description = $2, date = $3, time = $4, venue = $5,
                category = $6, capacity = $7, image_url = $8, organizer = $9, status = $10
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.time)
        .bind(&data.venue)
        .bind(&data.category)
        .bind(data.capacity)
        .bind(&data.image_url)
        .bind(&data.organizer)
        .bind(data.status)
        .bind(event_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| match &e {
            // Capacity cannot drop below the seats already taken.
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                DatabaseError::InvalidInput(
                    "Capacity cannot be lower than the registered count".to_string(),
                )
            }
            _ => DatabaseError::Sqlx(e),
        })?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn delete(pool: &PgPool, event_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    DatabaseError::Referenced
                }
                _ => DatabaseError::Sqlx(e),
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically take one seat. The capacity comparison and the increment
    /// are a single statement, so two racing registrations cannot both win
    /// the last seat. Returns false when the event is missing or full.
    pub async fn claim_seat(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET registered_count = registered_count + 1
            WHERE id = $1 AND registered_count < capacity
            "#,
        )
        .bind(event_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.is_some())
    }
}
