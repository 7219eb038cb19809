use anyhow::Result;
use std::path::{Path, PathBuf};

/// Explicit config file location from `WATCHLY_CONFIG`, if set.
pub fn config_path_override() -> Option<PathBuf> {
    std::env::var("WATCHLY_CONFIG")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchly");

        Ok(Self::with_base(base_dir))
    }

    /// Lay everything out under an arbitrary directory (tests, portable installs).
    pub fn with_base(base_dir: PathBuf) -> Self {
        Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
        }
    }

    /// `WATCHLY_CONFIG` wins over the platform location.
    pub fn config_file(&self) -> PathBuf {
        config_path_override().unwrap_or_else(|| self.config_dir.join("config.toml"))
    }

    /// A bare file name from `[logging].file` lands in the log directory;
    /// anything with a directory part is used as written.
    pub fn resolve_log_file(&self, configured: &Path) -> PathBuf {
        match configured.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => configured.to_path_buf(),
            _ => self.log_dir.join(configured),
        }
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // e.g. ~/.config/watchly on Linux; fall back to the working directory
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".watchly")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/watchly-test"));
        if config_path_override().is_none() {
            assert_eq!(paths.config_file(), PathBuf::from("/tmp/watchly-test/config.toml"));
        }
    }

    #[test]
    fn test_resolve_log_file() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/watchly-test"));
        assert_eq!(
            paths.resolve_log_file(Path::new("watchly.log")),
            PathBuf::from("/tmp/watchly-test/logs/watchly.log")
        );
        assert_eq!(
            paths.resolve_log_file(Path::new("/var/log/watchly.log")),
            PathBuf::from("/var/log/watchly.log")
        );
        assert_eq!(
            paths.resolve_log_file(Path::new("logs/watchly.log")),
            PathBuf::from("logs/watchly.log")
        );
    }
}
