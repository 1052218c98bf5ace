//! Constants used throughout the ingest core crate.
//!
//! Routing keys, tenant database names, collection names and environment variable names live
//! here so adapters and tests agree on them.

/// Routing key (queue `MessageGroupId`) for tenant A.
pub const ROUTING_KEY_HCA: &str = "001";

/// Routing key (queue `MessageGroupId`) for tenant B.
pub const ROUTING_KEY_HCB: &str = "002";

/// Logical database of tenant A.
pub const HCA_DATABASE: &str = "fhir_hca";

/// Logical database of tenant B.
pub const HCB_DATABASE: &str = "fhir_hcb";

/// Collection holding patient sub-records.
pub const PATIENTS_COLLECTION: &str = "patients";

/// Collection holding practitioner sub-records.
pub const PRACTITIONERS_COLLECTION: &str = "practitioners";

/// Collection holding encounter sub-records.
pub const ENCOUNTERS_COLLECTION: &str = "encounters";

/// Queue message attribute carrying the routing key.
pub const ROUTING_ATTRIBUTE: &str = "MessageGroupId";

pub const ENV_QUEUE_URL: &str = "SQS_QUEUE_URL";
pub const ENV_QUEUE_ENDPOINT_URL: &str = "SQS_ENDPOINT_URL";
pub const ENV_QUEUE_REGION: &str = "AWS_REGION";
pub const ENV_QUEUE_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_QUEUE_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_DB_URI: &str = "DB_URI";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PWD";
pub const ENV_LOG_DIR: &str = "INGEST_LOG_DIR";
pub const ENV_POLL_WAIT_SECONDS: &str = "INGEST_POLL_WAIT_SECONDS";
pub const ENV_IDLE_PAUSE_MS: &str = "INGEST_IDLE_PAUSE_MS";
pub const ENV_SOURCE_ERROR_PAUSE_MS: &str = "INGEST_SOURCE_ERROR_PAUSE_MS";

pub const DEFAULT_QUEUE_REGION: &str = "sa-east-1";
pub const DEFAULT_QUEUE_ENDPOINT_URL: &str = "http://localstack:4566";
pub const DEFAULT_QUEUE_ACCESS_KEY_ID: &str = "test";
pub const DEFAULT_QUEUE_SECRET_ACCESS_KEY: &str = "test";
pub const DEFAULT_LOG_DIR: &str = "/app/logs";

/// Long-poll wait for a single receive.
pub const DEFAULT_POLL_WAIT_SECONDS: i32 = 5;

/// Upper bound SQS accepts for `WaitTimeSeconds`.
pub const MAX_POLL_WAIT_SECONDS: i32 = 20;

/// Shortest accepted wait; zero would turn the long poll into a short poll.
pub const MIN_POLL_WAIT_SECONDS: i32 = 1;

/// Pause after a poll that returned no message.
pub const DEFAULT_IDLE_PAUSE_MS: u64 = 1_000;

/// Pause after the message source failed.
pub const DEFAULT_SOURCE_ERROR_PAUSE_MS: u64 = 5_000;

/// File name prefix of the rotating log files (`worker.YYYY-MM-DD.log`).
pub const LOG_FILE_PREFIX: &str = "worker";
pub const LOG_FILE_SUFFIX: &str = "log";

/// Daily files kept on disk, roughly 72 hours of logs.
pub const LOG_FILES_RETAINED: usize = 3;

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";
