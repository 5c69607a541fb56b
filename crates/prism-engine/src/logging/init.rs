use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};

/// Environment variable overriding [`LoggingConfig::log_file`].
///
/// An empty value disables the log file.
pub const LOG_FILE_ENV: &str = "PRISM_LOG_FILE";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "prism_engine=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted,
/// then `info` is used.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,

    /// Writes records to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Logs to `debug.log` in the working directory.
    pub fn with_debug_file() -> Self {
        Self {
            log_file: Some(PathBuf::from("debug.log")),
            ..Self::default()
        }
    }

    /// Applies the `PRISM_LOG_FILE` override.
    fn resolved_log_file(&self) -> Option<PathBuf> {
        resolve_log_file(self.log_file.clone(), std::env::var(LOG_FILE_ENV).ok())
    }
}

fn resolve_log_file(configured: Option<PathBuf>, env: Option<String>) -> Option<PathBuf> {
    match env {
        Some(v) if v.is_empty() => None,
        Some(v) => Some(PathBuf::from(v)),
        None => configured,
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Fails only when the log file cannot be
/// created, which callers treat as an initialization failure.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if let Some(path) = config.resolved_log_file() {
            match File::create(&path)
                .with_context(|| format!("unable to open log file {}", path.display()))
            {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                    builder.write_style(env_logger::WriteStyle::Never);
                }
                Err(e) => {
                    result = Err(e);
                    return;
                }
            }
        }

        builder.init();
        log::debug!("logging initialized");
    });

    result
}
