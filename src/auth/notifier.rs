use async_trait::async_trait;
use tracing::debug;

use super::user::User;

/// Delivers a password reset link to the account owner.
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn send_reset_link(&self, user: &User, link: &str) -> anyhow::Result<()>;
}

/// Writes the link to the debug log. Used until a mail transport is wired in.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ResetNotifier for LogNotifier {
    async fn send_reset_link(&self, user: &User, link: &str) -> anyhow::Result<()> {
        debug!(user_id = %user.id, %link, "password reset link");
        Ok(())
    }
}
