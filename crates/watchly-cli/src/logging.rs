use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::PathBuf;
use watchly_config::{LoggingConfig, PathManager};

/// Filter directive for the given flags. `configured_level` applies when no
/// `-v` was passed and `RUST_LOG` is unset.
pub fn filter_directive(verbose_level: u8, quiet: bool, configured_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose_level {
        0 => configured_level.to_string(),
        // -v: debug, but keep hyper's connection chatter down
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn".to_string(),
        _ => "trace".to_string(),
    }
}

/// Where file logging goes, if `[logging].file` is set.
pub fn log_file_path(config: &LoggingConfig, paths: &PathManager) -> Option<PathBuf> {
    config.file.as_deref().map(|file| paths.resolve_log_file(file))
}

pub fn init_logging(
    verbose_level: u8,
    quiet: bool,
    config: &LoggingConfig,
    paths: &PathManager,
) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet, &config.level);
    let filter = if quiet {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| config.json.unwrap_or_else(|| !io::stdout().is_terminal()));

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file_path(config, paths) {
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
        std::fs::create_dir_all(log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // watchly.log -> watchly.log.2026-10-18 etc.
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_filename);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).try_init()?;
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).try_init()?;
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
