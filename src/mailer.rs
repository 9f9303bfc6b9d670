use axum::async_trait;
use tracing::info;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, token: &str) -> anyhow::Result<()>;
}

/// Default transport: writes the message to the log instead of a relay.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, token: &str) -> anyhow::Result<()> {
        info!(%to, %token, "password reset email");
        Ok(())
    }
}
