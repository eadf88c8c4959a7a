use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use super::jwt;
use crate::config;
use crate::db::models::UserRole;
use crate::error::AppError;

/// The authenticated caller, decoded from the bearer token. Handlers take
/// this by value and pass it along explicitly; nothing below the extractor
/// reads ambient auth state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn require_any(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Insufficient permissions".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Access token required".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Access token required".to_string()))?;

        let auth = &config::get().auth;
        let claims = jwt::verify(token, &auth.jwt_secret)?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "manager@ums.edu.my".to_string(),
            role: UserRole::EventManager,
        }
    }

    #[test]
    fn role_gate_accepts_listed_roles() {
        assert!(manager()
            .require_any(&[UserRole::EventManager, UserRole::Admin])
            .is_ok());
    }

    #[test]
    fn role_gate_rejects_other_roles() {
        let err = manager().require_any(&[UserRole::Admin]).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }
}
