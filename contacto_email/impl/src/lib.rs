use std::time::Duration;

use anyhow::anyhow;
use contacto_email_contracts::{ContentType, Email, EmailService};
use contacto_utils::Apply;
use lettre::{
    message::{header, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

#[derive(Debug, Clone)]
pub struct EmailCredentials {
    pub username: String,
    pub password: String,
}

impl EmailServiceImpl {
    /// Create the smtp transport for the relay at `url`.
    ///
    /// Without credentials no transport is created at all and every attempt
    /// to send an email fails.
    pub fn new(
        url: &str,
        credentials: Option<EmailCredentials>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let Some(EmailCredentials { username, password }) = credentials else {
            return Ok(Self::unconfigured());
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .credentials(Credentials::new(username, password))
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport: Some(transport),
        })
    }

    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    fn transport(&self) -> anyhow::Result<&AsyncSmtpTransport<Tokio1Executor>> {
        self.transport
            .as_ref()
            .ok_or_else(|| anyhow!("Smtp credentials are not configured"))
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let transport = self.transport()?;

        let message = Message::builder()
            .from(email.sender.0)
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        let response = transport.send(message).await?;
        debug!(code = %response.code(), "smtp server responded");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport()?
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }

    fn is_configured(&self) -> bool {
        self.transport.is_some()
    }
}
