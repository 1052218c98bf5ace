//! # Process logging
//!
//! Sets up `tracing` output to standard output and to a daily-rotating file at the same time.
//!
//! Log files are named `worker.YYYY-MM-DD.log` inside the configured directory and only the most
//! recent [`LOG_FILES_RETAINED`] files are kept. The file writer is non-blocking; its flush guard
//! lives in the returned [`LoggingHandle`], which the binary holds until exit.

use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILES_RETAINED, LOG_FILE_PREFIX, LOG_FILE_SUFFIX};
use crate::error::LoggingError;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Process-scoped logging state.
///
/// Dropping the handle flushes and stops the background file writer.
#[derive(Debug)]
pub struct LoggingHandle {
    log_dir: PathBuf,
    _guard: WorkerGuard,
}

impl LoggingHandle {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Initialise logging once at startup.
///
/// `RUST_LOG` overrides the default `info` filter. If a global subscriber is already installed
/// (tests, embedding) the existing one is kept and only the file writer is created.
///
/// # Errors
///
/// Returns [`LoggingError`] if the log directory cannot be created or the log file opened.
pub fn init_logging(log_dir: &Path) -> Result<LoggingHandle, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::LogDirCreation {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_FILES_RETAINED)
        .build(log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("global tracing subscriber already initialised, keeping it");
    }

    tracing::info!(log_dir = %log_dir.display(), "logging initialised");

    Ok(LoggingHandle {
        log_dir: log_dir.to_path_buf(),
        _guard: guard,
    })
}
