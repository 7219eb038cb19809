use crate::logging::log_file_path;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use std::path::Path;
use watchly_config::{Config, PathManager};

pub fn run_init(api_key: Option<String>, force: bool, output: &Output) -> Result<()> {
    let path = PathManager::default().config_file();
    init_at(&path, api_key, force)?;
    output.success(format!("Wrote configuration to {}", path.display()));
    Ok(())
}

pub fn init_at(path: &Path, api_key: Option<String>, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(eyre!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let config = Config::template().with_api_key_override(api_key);
    config
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;
    tracing::info!("Config written to {}", path.display());
    Ok(config)
}

pub fn run_show(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let path = paths.config_file();
    let config = Config::load_or_default(&path)
        .map_err(|e| eyre!("Failed to read config from {}: {}", path.display(), e))?;

    let api_key = if full {
        config.api.api_key.clone()
    } else {
        config.masked_api_key()
    };
    let log_file = log_file_path(&config.logging, &paths)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(stderr)".to_string());

    if output.is_human() {
        output.info(format!("Config file:     {}", path.display()));
        output.info(format!("Base URL:        {}", config.api.base_url));
        output.info(format!("API key:         {}", api_key));
        output.info(format!("Timeout:         {}s (connect {}s)", config.api.timeout_secs, config.api.connect_timeout_secs));
        output.info(format!("Log level:       {}", config.logging.level));
        output.info(format!("Log file:        {}", log_file));
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => output.warn(e.to_string()),
        }
    } else {
        output.json(&json!({
            "type": "config",
            "path": path.display().to_string(),
            "base_url": config.api.base_url,
            "api_key": api_key,
            "timeout_secs": config.api.timeout_secs,
            "connect_timeout_secs": config.api.connect_timeout_secs,
            "log_level": config.logging.level,
            "log_file": log_file,
            "valid": config.validate().is_ok(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchly").join("config.toml");

        let config = init_at(&path, None, false).unwrap();
        assert!(!config.is_api_key_configured());

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_init_with_key_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = init_at(&path, Some("abc123".to_string()), false).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_at(&path, Some("first".to_string()), false).unwrap();
        assert!(init_at(&path, Some("second".to_string()), false).is_err());

        init_at(&path, Some("second".to_string()), true).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api.api_key, "second");
    }
}
