//! # cl-config
//!
//! Layered settings for the condo-laundry binary. Sources, lowest priority
//! first:
//!
//! 1. built-in defaults
//! 2. `condo-laundry.toml` in the working directory (optional)
//! 3. `CONDO_LAUNDRY__SECTION__KEY` environment variables, after a `.env`
//!    file has been loaded into the environment

use cl_core::ResidentProfile;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const FILE_NAME: &str = "condo-laundry";
pub const ENV_PREFIX: &str = "CONDO_LAUNDRY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub resident: ResidentProfile,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct BackendSettings {
    /// Origin of the condominium API, e.g. "http://localhost:5000"
    pub base_url: String,
    /// Admin session cookie forwarded on every backend request
    #[serde(default, deserialize_with = "non_empty_secret")]
    pub session_cookie: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub filter: String,
    pub json: bool,
}

fn non_empty_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from))
}

/// Defaults only. Callers add their own sources on top.
pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080_i64)?
        .set_default("backend.base_url", "http://localhost:5000")?
        .set_default("resident.floor", 5_i64)?
        .set_default("resident.apartment", "502")?
        .set_default("log.filter", "info")?
        .set_default("log.json", false)?)
}

impl Settings {
    /// Reads `.env`, the optional config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        let config = builder()?
            .add_source(File::with_name(FILE_NAME).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.backend.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        if self.resident.apartment.trim().is_empty() {
            return Err(ConfigError::Invalid("resident.apartment is empty".into()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
