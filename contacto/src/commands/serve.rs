use contacto_config::Config;
use contacto_di::Provide;
use contacto_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;

    if email.is_configured() {
        info!("Connecting to smtp server");
        if let Err(err) = email.ping().await {
            warn!("Smtp server is not reachable: {err:#}");
        }
    } else {
        warn!("Smtp credentials are not configured, contact messages will be rejected");
    }

    if config.contact.recipient.is_none() {
        warn!("Contact recipient is not configured, contact messages will be rejected");
    }

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
