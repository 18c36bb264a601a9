use std::sync::Arc;

use anyhow::Context;
use contacto_api_rest::RestServerConfig;
use contacto_config::Config;
use contacto_core_contact_impl::ContactFeatureConfig;
use contacto_core_health_impl::HealthFeatureConfig;
use contacto_di::provider;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            ContactFeatureConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            built: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: (config.http.host, config.http.port).into(),
            allowed_origin: config.http.allowed_origin.parse().with_context(|| {
                format!("Invalid allowed origin: {:?}", config.http.allowed_origin)
            })?,
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().map(Arc::new),
            send_timeout: config.email.timeout.into(),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            built: Default::default(),

            // API
            rest_server_config,

            // Core
            contact_feature_config,
            health_feature_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use contacto_di::Provide;
    use contacto_email_impl::EmailServiceImpl;
    use types::RestServer;

    use super::*;

    #[test]
    fn provide_rest_server() {
        let config = contacto_config::load_default_config().unwrap();
        let config_provider = ConfigProvider::new(&config).unwrap();

        let email = EmailServiceImpl::unconfigured();

        let mut provider = Provider::new(config_provider, email);
        let _: RestServer = provider.provide();
    }
}
