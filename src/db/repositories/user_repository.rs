use crate::db::models::{NewUser, UpdateProfile, User, UserRole, UserStatus};
use crate::db::{unique_violation, DatabaseError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// `password_hash` is produced by the auth layer; repositories never see
    /// plaintext passwords.
    pub async fn create(
        pool: &PgPool,
        data: &NewUser,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let role = data.role.unwrap_or(UserRole::Student);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, name, role, status, student_id, faculty)
            VALUES ($1, $2, $3, $4, $5, 'active', $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.email.to_lowercase())
        .bind(password_hash)
        .bind(&data.name)
        .bind(role)
        .bind(&data.student_id)
        .bind(&data.faculty)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if unique_violation(&e, "users_email_key") {
                DatabaseError::Duplicate
            } else {
                DatabaseError::Sqlx(e)
            }
        })
    }

    pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        data: &UpdateProfile,
    ) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                faculty = COALESCE($3, faculty)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.faculty)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn update_status(
        pool: &PgPool,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("UPDATE users SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn touch_last_login(pool: &PgPool, user_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
