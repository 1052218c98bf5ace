use crate::gateway::PersistStage;
use crate::pipeline::Stage;
use crate::routing::TenantId;
use ingest_types::StorageId;

/// Startup configuration problems. The only errors that end the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be provided")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}", path = path.display())]
    LogDirCreation {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open rotating log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
}

/// Queue transport or authentication failure.
#[derive(Debug, thiserror::Error)]
#[error("message source unavailable: {message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A message body that does not decode into a bundle.
///
/// Keeps the original text and message identifier for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode message {message_id}: {source}")]
pub struct DecodeError {
    pub message_id: String,
    pub raw: String,
    #[source]
    pub source: fhir::FhirError,
}

/// Tenant datastore unreachable or rejected the credentials.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect to {tenant} datastore: {message}")]
pub struct ConnectError {
    pub tenant: TenantId,
    pub message: String,
}

impl ConnectError {
    pub fn new(tenant: TenantId, message: impl Into<String>) -> Self {
        Self {
            tenant,
            message: message.into(),
        }
    }
}

/// A single insert rejected by a tenant datastore.
#[derive(Debug, thiserror::Error)]
#[error("{collection} insert failed: {message}")]
pub struct StoreError {
    pub collection: &'static str,
    pub message: String,
}

impl StoreError {
    pub fn new(collection: &'static str, message: impl Into<String>) -> Self {
        Self {
            collection,
            message: message.into(),
        }
    }
}

/// Failure while writing a bundle.
///
/// Writes are not rolled back: `patient_id`/`practitioner_id` hold whatever was already stored
/// before `stage` failed, and those records stay in the datastore without an encounter.
#[derive(Debug, thiserror::Error)]
#[error("failed to persist {stage}: {source}")]
pub struct PersistError {
    pub stage: PersistStage,
    pub patient_id: Option<StorageId>,
    pub practitioner_id: Option<StorageId>,
    #[source]
    pub source: StoreError,
}

impl PersistError {
    /// Identifiers of records left behind by this failure.
    pub fn orphaned(&self) -> Vec<&StorageId> {
        self.patient_id
            .iter()
            .chain(self.practitioner_id.iter())
            .collect()
    }
}

/// Per-message failure kinds, each tied to the pipeline stage that produced it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),
    #[error("unknown tenant for routing key {routing_key:?}")]
    UnknownTenant { routing_key: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::SourceUnavailable(_) => Stage::Polling,
            PipelineError::UnknownTenant { .. } => Stage::Routing,
            PipelineError::Decode(_) => Stage::Decoding,
            PipelineError::Connect(_) => Stage::Connecting,
            PipelineError::Persist(_) => Stage::Persisting,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
