use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{User, UserRole};
use crate::error::AppError;

/// Claims carried by every access token. The role claim is what the route
/// layer gates on; the token itself never holds account status, so a
/// suspended user keeps an already-issued token until it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(user: &User, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: now,
        exp: now + ttl_hours * 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {e}")))
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::UserStatus;

    const SECRET: &str = "test-secret";

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "student@ums.edu.my".to_string(),
            password_hash: String::new(),
            name: "Test Student".to_string(),
            role: UserRole::Student,
            status: UserStatus::Active,
            student_id: Some("BI12345".to_string()),
            faculty: None,
            phone: None,
            email_verified: false,
            created_at: OffsetDateTime::now_utc(),
            last_login: None,
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let user = sample_user();
        let token = issue(&user, SECRET, 168).unwrap();
        let claims = verify(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Student);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(&sample_user(), SECRET, 168).unwrap();
        assert!(verify(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "student@ums.edu.my".to_string(),
            role: UserRole::Student,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify(&token, SECRET).is_err());
    }
}
