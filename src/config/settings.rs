use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the admin API key
pub const API_KEY_ENV: &str = "CURSOR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Connection settings for the Cursor admin API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cursor.com".to_string(),
            timeout_secs: 30,
            user_agent: "cursor-admin-mcp/1.0.0".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "cursor-admin-mcp".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, `config/{CONFIG_ENV}` and `CURSOR_ADMIN__*` variables
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        Self::builder()?
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load settings from an explicit file layered over the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs as i64)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("server.name", defaults.server.name)?
            .set_default("logging.level", defaults.logging.level)
    }

    /// Read the admin API key; it is never part of the layered settings
    pub fn api_key() -> anyhow::Result<String> {
        require_api_key(env::var(API_KEY_ENV).ok())
    }
}

/// `CURSOR_ADMIN__<SECTION>__<KEY>`, e.g. `CURSOR_ADMIN__API__TIMEOUT_SECS`
fn environment() -> Environment {
    Environment::with_prefix("CURSOR_ADMIN").separator("__")
}

fn require_api_key(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(anyhow::anyhow!(
            "{} environment variable is required",
            API_KEY_ENV
        )),
    }
}
