use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.watchmode.com/v1/";

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "WATCHMODE_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api_key is not configured (set it in config.toml or WATCHMODE_API_KEY)")]
    MissingApiKey,
    #[error("base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: Option<bool>, // None = decide from the terminal
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults. The
    /// `WATCHMODE_API_KEY` override is applied either way.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// A non-blank key replaces whatever the file had.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api.api_key = key;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_api_key_configured() {
            return Err(ConfigError::MissingApiKey);
        }
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeout_secs"));
        }
        if self.api.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_secs"));
        }
        Ok(())
    }

    pub fn is_api_key_configured(&self) -> bool {
        let key = self.api.api_key.trim();
        !key.is_empty() && key != API_KEY_PLACEHOLDER
    }

    /// Key with everything but the last four characters masked.
    pub fn masked_api_key(&self) -> String {
        let key = self.api.api_key.trim();
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        let hidden = key.chars().count().saturating_sub(visible.chars().count());
        format!("{}{}", "*".repeat(hidden), visible)
    }

    /// Template written by `watchly config init`.
    pub fn template() -> Self {
        let mut config = Self::default();
        config.api.api_key = API_KEY_PLACEHOLDER.to_string();
        config
    }
}
