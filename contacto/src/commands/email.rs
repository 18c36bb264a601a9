use anyhow::{ensure, Context};
use clap::Subcommand;
use contacto_config::Config;
use contacto_email_contracts::{ContentType, Email, EmailService};
use contacto_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email using the configured smtp server
    Test {
        recipient: EmailAddressWithName,
        /// Sender address, defaults to the smtp username
        #[arg(long)]
        from: Option<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient, from } => test(config, recipient, from).await,
        }
    }
}

async fn test(
    config: Config,
    recipient: EmailAddressWithName,
    from: Option<EmailAddressWithName>,
) -> anyhow::Result<()> {
    let sender = match from {
        Some(from) => from,
        None => config
            .email
            .username
            .as_deref()
            .context("No sender given and no smtp username configured")?
            .parse()
            .context("The smtp username is not a valid email address")?,
    };

    let email_service = email::connect(&config.email)?;
    ensure!(
        email_service.is_configured(),
        "Smtp credentials are not configured"
    );

    let ok = email_service
        .send(Email {
            sender,
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
