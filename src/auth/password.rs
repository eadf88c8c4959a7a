use secrecy::{ExposeSecret, SecretBox};

use crate::error::AppError;

const COST: u32 = 10;

/// bcrypt is CPU-bound, so both operations run on the blocking pool.
pub async fn hash(password: &SecretBox<String>) -> Result<String, AppError> {
    let password = password.expose_secret().clone();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, COST))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {e}")))
}

pub async fn verify(password: &SecretBox<String>, hashed: &str) -> Result<bool, AppError> {
    let password = password.expose_secret().clone();
    let hashed = hashed.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretBox<String> {
        SecretBox::new(Box::new(value.to_string()))
    }

    #[tokio::test]
    async fn hash_and_verify_round_trip() {
        let hashed = hash(&secret("correct horse battery staple")).await.unwrap();
        assert!(verify(&secret("correct horse battery staple"), &hashed)
            .await
            .unwrap());
        assert!(!verify(&secret("wrong password"), &hashed).await.unwrap());
    }
}
