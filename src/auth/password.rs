use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

use super::errors::AccountError;

/// Hash with a fresh random salt. Every call yields a different PHC string.
pub fn hash_password(plain: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AccountError::Hashing(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` is a mismatch; `Err` means the stored hash cannot be judged.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AccountError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AccountError::Hashing(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Produces the stored form of a new password.
pub trait PasswordService: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, AccountError>;
}

#[derive(Clone, Default)]
pub struct Argon2Passwords;

impl PasswordService for Argon2Passwords {
    fn hash(&self, plain: &str) -> Result<String, AccountError> {
        hash_password(plain)
    }
}

// Argon2 is CPU bound; keep it off the request executor.

pub async fn hash_password_async(
    passwords: Arc<dyn PasswordService>,
    plain: String,
) -> Result<String, AccountError> {
    tokio::task::spawn_blocking(move || passwords.hash(&plain))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?
}

pub async fn verify_password_async(plain: String, hash: String) -> Result<bool, AccountError> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?
}
