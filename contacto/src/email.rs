use anyhow::Context;
use contacto_config::EmailConfig;
use contacto_email_impl::{EmailCredentials, EmailServiceImpl};

/// Create the smtp transport described by `config`.
///
/// No connection is opened yet. Missing credentials result in an email
/// service that reports itself as not configured.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = config
        .credentials()
        .map(|(username, password)| EmailCredentials {
            username: username.into(),
            password: password.into(),
        });

    EmailServiceImpl::new(&config.smtp_url, credentials, config.timeout.into())
        .context("Failed to create smtp transport")
}
