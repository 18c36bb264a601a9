use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use contacto_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use contacto_di::Build;
use contacto_email_contracts::{ContentType, Email, EmailService};
use contacto_models::{
    contact::{ContactForm, ContactMessage},
    email_address::EmailAddressWithName,
    html,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The address all contact messages are delivered to.
    pub recipient: Option<Arc<EmailAddressWithName>>,
    pub send_timeout: Duration,
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(&self, form: ContactForm) -> Result<(), ContactSendMessageError> {
        let message = form.validate().map_err(|fields| {
            warn!(?fields, "rejected invalid contact form");
            ContactSendMessageError::Validation(fields)
        })?;

        let Some(recipient) = self.config.recipient.as_deref() else {
            error!("contact recipient is not configured");
            return Err(ContactSendMessageError::NotConfigured);
        };

        if !self.email.is_configured() {
            error!("smtp credentials are not configured");
            return Err(ContactSendMessageError::NotConfigured);
        }

        let email = make_email(&message, recipient.clone());

        let sent = tokio::time::timeout(self.config.send_timeout, self.email.send(email))
            .await
            .map_err(|_| {
                anyhow!(
                    "Timed out after {:?} while sending contact message",
                    self.config.send_timeout
                )
            })?
            .context("Failed to send contact message")?;

        if !sent {
            error!("smtp server did not accept the contact message");
            return Err(ContactSendMessageError::Send);
        }

        info!(sender = %message.author.email, "contact message sent");

        Ok(())
    }
}

fn make_email(message: &ContactMessage, recipient: EmailAddressWithName) -> Email {
    let author = &message.author;
    let phone = author.phone.as_deref().map(String::as_str).unwrap_or_default();

    let body = format!(
        "<h1>{name}</h1>\n\
         <h2>{subject}</h2>\n\
         <p>Email: {email}</p>\n\
         <p>Teléfono: {phone}</p>\n\
         <p>{content}</p>\n",
        name = author.name,
        subject = message.subject,
        email = html::escape(author.email.as_str()),
        content = message.content,
    );

    Email {
        sender: author.email.clone().into(),
        recipient,
        subject: message.subject.to_string(),
        body,
        content_type: ContentType::Html,
        reply_to: Some(author.email.clone().into()),
    }
}
