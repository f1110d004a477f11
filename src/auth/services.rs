use tracing::{error, info, warn};

use super::errors::AccountError;
use super::password::hash_password_async;
use super::user::{normalize_email, NewUser, User};
use crate::db::{is_unique_violation, now_millis};
use crate::state::AppState;

/// Validates, hashes, then inserts. The plaintext never reaches the repository.
pub async fn register(
    st: &AppState,
    email: &str,
    name: &str,
    password: &str,
) -> Result<User, AccountError> {
    let new = NewUser::parse(email, name, password)?;

    if st.users.find_by_email(&new.email).await?.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let hash = hash_password_async(st.passwords.clone(), new.password).await?;
    // A concurrent registration can slip past the lookup above.
    let user = st
        .users
        .create(&new.email, &new.name, &hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AccountError::EmailTaken
            } else {
                AccountError::Storage(e)
            }
        })?;
    info!(user_id = %user.id, "user registered");
    Ok(user)
}

pub async fn authenticate(st: &AppState, email: &str, password: &str) -> Result<User, AccountError> {
    let email = normalize_email(email);
    let Some(user) = st.users.find_by_email(&email).await? else {
        warn!("login unknown email");
        return Err(AccountError::InvalidCredentials);
    };

    if !user.compare_password(password).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AccountError::InvalidCredentials);
    }
    Ok(user)
}

/// Issues and stores a reset token when the email is known. Unknown emails
/// succeed silently, and so does a failed delivery once the token is stored.
pub async fn request_password_reset(st: &AppState, email: &str) -> Result<(), AccountError> {
    let email = normalize_email(email);
    let Some(mut user) = st.users.find_by_email(&email).await? else {
        warn!("password reset for unknown email");
        return Ok(());
    };

    let token = user.issue_password_reset_token();
    let expires = user.password_reset_expires.unwrap_or_default();
    st.users.save_reset_token(user.id, &token, expires).await?;

    let link = format!("{}/reset/{}", st.config.public_base_url, token);
    if let Err(e) = st.notifier.send_reset_link(&user, &link).await {
        error!(error = %e, user_id = %user.id, "reset link delivery failed");
        return Ok(());
    }
    info!(user_id = %user.id, "password reset token issued");
    Ok(())
}

pub async fn reset_password(
    st: &AppState,
    token: &str,
    new_password: &str,
) -> Result<User, AccountError> {
    if new_password.is_empty() {
        return Err(AccountError::MissingField("password"));
    }

    let user = st
        .users
        .find_by_reset_token(token)
        .await?
        .filter(|u| u.reset_token_is_valid(token, now_millis()))
        .ok_or(AccountError::InvalidResetToken)?;

    change_password(st, &user, new_password).await
}

/// Every password write goes through here so it is always hashed first.
pub async fn change_password(
    st: &AppState,
    user: &User,
    new_password: &str,
) -> Result<User, AccountError> {
    let hash = hash_password_async(st.passwords.clone(), new_password.to_string()).await?;
    let updated = st.users.update_password(user.id, &hash).await?;
    info!(user_id = %updated.id, "password changed");
    Ok(updated)
}
