use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Registration;
use crate::db::repositories::{EventRepository, RegistrationRepository};
use crate::db::DatabaseError;
use crate::error::AppError;

/// Take one seat and mint the registration with its personal check-in token.
///
/// The seat claim is a conditional increment, so the capacity check cannot
/// race; for an event with capacity C, C+N concurrent attempts yield exactly
/// C registrations. A duplicate (event, user) pair rolls the claimed seat
/// back along with the transaction.
pub async fn register(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<Registration, AppError> {
    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    if !EventRepository::claim_seat(&mut tx, event_id).await? {
        // Missing and full both leave the seat unclaimed; tell them apart.
        return if EventRepository::exists(&mut tx, event_id).await? {
            Err(AppError::EventFull)
        } else {
            Err(AppError::NotFound("Event not found".to_string()))
        };
    }

    let checkin_token = Uuid::new_v4().to_string();
    let registration =
        match RegistrationRepository::create(&mut tx, event_id, user_id, &checkin_token).await {
            Ok(registration) => registration,
            Err(DatabaseError::Duplicate) => {
                return Err(AppError::Conflict(
                    "Already registered for this event".to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(registration)
}
