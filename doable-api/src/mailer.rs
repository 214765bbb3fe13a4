/// Verification-notice dispatch
///
/// Email delivery is an external collaborator: registration hands the
/// verification token to a [`Mailer`] and moves on. Dispatch failures are
/// logged, never surfaced to the registering user - the account exists
/// either way and a fresh registration attempt would conflict.
///
/// `TracingMailer` is the default implementation; it logs the verification
/// link instead of sending anything. Tests swap in a recording mock.

use async_trait::async_trait;

/// Error type for mail dispatch
#[derive(Debug, thiserror::Error)]
#[error("Failed to send mail: {0}")]
pub struct MailerError(pub String);

/// Outbound-mail collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the account-verification notice carrying `token`
    async fn send_verification(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<(), MailerError>;
}

/// Mailer that logs the verification link via tracing
#[derive(Debug, Clone)]
pub struct TracingMailer {
    base_url: String,
}

impl TracingMailer {
    /// Creates a mailer that builds links against `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send_verification(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(
            recipient = %email,
            name = %name,
            link = %format!("{}/users/verify/{}", self.base_url, token),
            "Verification notice dispatched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_mailer_succeeds() {
        let mailer = TracingMailer::new("http://localhost:8080");
        let result = mailer
            .send_verification("ana@example.com", "Ana", "tok123")
            .await;
        assert!(result.is_ok());
    }
}
