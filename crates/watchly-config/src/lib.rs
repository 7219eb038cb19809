pub mod config;
pub mod paths;

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use paths::{config_path_override, PathManager};
