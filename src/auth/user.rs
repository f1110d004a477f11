use lazy_static::lazy_static;
use rand::{rngs::OsRng, RngCore};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::errors::AccountError;
use super::password::verify_password_async;
use crate::db::now_millis;

/// Reset tokens stay valid for one hour.
pub const PASSWORD_RESET_TTL_MS: i64 = 3_600_000;
const RESET_TOKEN_BYTES: usize = 32;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never plaintext
    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    #[serde(skip_serializing)]
    pub password_reset_expires: Option<i64>, // epoch ms
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn compare_password(&self, candidate: &str) -> Result<bool, AccountError> {
        verify_password_async(candidate.to_string(), self.password_hash.clone()).await
    }

    /// Sets the reset token and its expiry on this record and returns the token.
    /// Persisting the change is up to the caller.
    pub fn issue_password_reset_token(&mut self) -> String {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.password_reset_token = Some(token.clone());
        self.password_reset_expires = Some(now_millis() + PASSWORD_RESET_TTL_MS);
        token
    }

    pub fn reset_token_is_valid(&self, token: &str, now_ms: i64) -> bool {
        match (&self.password_reset_token, self.password_reset_expires) {
            (Some(stored), Some(expires)) => stored == token && now_ms < expires,
            _ => false,
        }
    }
}

/// Validated registration input. The password is still plaintext here and
/// must be hashed before it reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl NewUser {
    pub fn parse(email: &str, name: &str, password: &str) -> Result<Self, AccountError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AccountError::MissingField("email"));
        }
        if !is_valid_email(&email) {
            return Err(AccountError::InvalidEmail);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::MissingField("name"));
        }
        if password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        Ok(Self {
            email,
            name: name.to_string(),
            password: password.to_string(),
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
