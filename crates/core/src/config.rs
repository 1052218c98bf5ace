//! Worker runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the queue source, the
//! datastore connector and the pipeline. Nothing reads environment variables while messages are
//! being processed.
//!
//! Missing required values are reported as [`ConfigError`]; only the binary turns that into a
//! process exit.

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};
use ingest_types::NonEmptyText;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Queue connection settings.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    pub queue_url: NonEmptyText,
    pub region: String,
    pub endpoint_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Long-poll wait per receive, in seconds.
    pub wait_seconds: i32,
}

/// Datastore credentials shared by every tenant.
#[derive(Clone)]
pub struct DatastoreConfig {
    pub uri: NonEmptyText,
    pub username: NonEmptyText,
    pub password: NonEmptyText,
}

impl std::fmt::Debug for DatastoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Pauses the driver applies between cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// After a poll that returned no message.
    pub idle: Duration,
    /// After the message source failed.
    pub source_error: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            idle: Duration::from_millis(DEFAULT_IDLE_PAUSE_MS),
            source_error: Duration::from_millis(DEFAULT_SOURCE_ERROR_PAUSE_MS),
        }
    }
}

/// Worker configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    queue: QueueConfig,
    datastore: DatastoreConfig,
    pacing: Pacing,
    log_dir: PathBuf,
}

impl WorkerConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through `lookup`, which returns the raw value of a variable.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `SQS_QUEUE_URL`, `DB_URI`, `DB_USER` or `DB_PWD` is
    /// absent, and [`ConfigError::Invalid`] when a numeric setting does not parse or is out of
    /// range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| {
            lookup(name)
                .and_then(|value| NonEmptyText::new(value).ok())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let queue_url = required(ENV_QUEUE_URL)?;
        let datastore = DatastoreConfig {
            uri: required(ENV_DB_URI)?,
            username: required(ENV_DB_USER)?,
            password: required(ENV_DB_PASSWORD)?,
        };

        let wait_seconds = parse_or(
            ENV_POLL_WAIT_SECONDS,
            lookup(ENV_POLL_WAIT_SECONDS),
            DEFAULT_POLL_WAIT_SECONDS,
        )?;
        if !(MIN_POLL_WAIT_SECONDS..=MAX_POLL_WAIT_SECONDS).contains(&wait_seconds) {
            return Err(ConfigError::Invalid {
                name: ENV_POLL_WAIT_SECONDS,
                reason: format!(
                    "must be between {MIN_POLL_WAIT_SECONDS} and {MAX_POLL_WAIT_SECONDS}"
                ),
            });
        }

        let queue = QueueConfig {
            queue_url,
            region: or_default(ENV_QUEUE_REGION, DEFAULT_QUEUE_REGION),
            endpoint_url: or_default(ENV_QUEUE_ENDPOINT_URL, DEFAULT_QUEUE_ENDPOINT_URL),
            access_key_id: or_default(ENV_QUEUE_ACCESS_KEY_ID, DEFAULT_QUEUE_ACCESS_KEY_ID),
            secret_access_key: or_default(
                ENV_QUEUE_SECRET_ACCESS_KEY,
                DEFAULT_QUEUE_SECRET_ACCESS_KEY,
            ),
            wait_seconds,
        };

        let pacing = Pacing {
            idle: Duration::from_millis(parse_or(
                ENV_IDLE_PAUSE_MS,
                lookup(ENV_IDLE_PAUSE_MS),
                DEFAULT_IDLE_PAUSE_MS,
            )?),
            source_error: Duration::from_millis(parse_or(
                ENV_SOURCE_ERROR_PAUSE_MS,
                lookup(ENV_SOURCE_ERROR_PAUSE_MS),
                DEFAULT_SOURCE_ERROR_PAUSE_MS,
            )?),
        };

        let log_dir = PathBuf::from(or_default(ENV_LOG_DIR, DEFAULT_LOG_DIR));

        Ok(Self {
            queue,
            datastore,
            pacing,
            log_dir,
        })
    }

    pub fn queue(&self) -> &QueueConfig {
        &self.queue
    }

    pub fn datastore(&self) -> &DatastoreConfig {
        &self.datastore
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
