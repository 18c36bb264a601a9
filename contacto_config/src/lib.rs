use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use contacto_models::{email_address::EmailAddressWithName, Sensitive};
pub use duration::Duration;
use serde::Deserialize;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files, applied in order.
pub const CONFIG_PATH_ENV: &str = "CONTACTO_CONFIG_PATH";

/// Prefix of environment variables overriding single values, e.g.
/// `CONTACTO__EMAIL__PASSWORD`.
pub const ENV_PREFIX: &str = "CONTACTO";

/// Load the configuration from the default config file, the files listed in
/// [`CONFIG_PATH_ENV`] and the environment.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(CONFIG_PATH_ENV) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        );
    }

    load_from(&paths, Some(environment()))
}

/// Load only the default config file, ignoring the environment.
pub fn load_default_config() -> anyhow::Result<Config> {
    load_from(&[DEFAULT_CONFIG_PATH], None)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_from(paths: &[impl AsRef<Path>], env: Option<Environment>) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = match env {
        Some(env) => builder.add_source(env),
        None => builder,
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// The only origin browsers may send requests from.
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    /// Relay host, port and security mode, e.g. `smtps://smtp.gmail.com:465`.
    pub smtp_url: String,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub recipient: Option<EmailAddressWithName>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

impl EmailConfig {
    /// Username and password, if both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|x| !x.is_empty())?;
        let password = self
            .password
            .as_deref()
            .map(String::as_str)
            .filter(|x| !x.is_empty())?;
        Some((username, password))
    }
}
