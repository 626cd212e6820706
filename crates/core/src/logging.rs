//! Tracing subscriber setup shared by the server and seeder binaries.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::settings::EnvSource;

/// Name of the log file written inside the dated folder.
pub const LOG_FILE_NAME: &str = "micropos.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// How the process-wide subscriber should be built.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. `micropos_api=debug`.
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// When set, also append to `{log_dir}/{YYYY-MM-DD}/micropos.log`.
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Read `LOG_FORMAT` (`json` or anything else) and `LOG_DIR`.
    pub fn from_source(source: &EnvSource, default_filter: impl Into<String>) -> Self {
        let json = source
            .get("LOG_FORMAT")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("json"));
        let log_dir = source
            .get("LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            default_filter: default_filter.into(),
            json,
            log_dir,
        }
    }
}

/// Install the global tracing subscriber.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let stdout_layer = if config.json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    let file_layer = match &config.log_dir {
        Some(dir) => {
            let file = open_dated_log_file(dir)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Path of today's log file under `dir`.
pub fn dated_log_path(dir: &Path) -> PathBuf {
    let day = chrono::Utc::now().format("%Y-%m-%d").to_string();
    dir.join(day).join(LOG_FILE_NAME)
}

fn open_dated_log_file(dir: &Path) -> Result<File, LoggingError> {
    let path = dated_log_path(dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggingError::File {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::File { path, source })
}
