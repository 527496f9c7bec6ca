mod settings;

pub use settings::{ApiConfig, LoggingConfig, ServerConfig, Settings, API_KEY_ENV};
