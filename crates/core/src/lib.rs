//! # Ingest Core
//!
//! Core message-processing pipeline of the clinical-record ingestion worker.
//!
//! One cycle takes a single queue message through:
//! - **Polling**: [`source::MessageSource::receive_one`] long-polls for at most one message
//! - **Routing**: [`routing::route`] maps the message's routing key to a tenant
//! - **Decoding**: [`decode::decode`] turns the JSON body into a [`fhir::BundleData`]
//! - **Connecting**: [`store::DatastoreConnector::connect`] opens a fresh tenant handle
//! - **Persisting**: [`gateway::persist`] writes patient, practitioner and linked encounter
//!
//! Every failure is isolated to its message: the [`pipeline::Pipeline`] logs it and polls again.
//!
//! **No transport concerns**: the SQS source lives in `ingest-queue` and the MongoDB store in
//! `ingest-store`. This crate only sees them through the traits in [`source`] and [`store`].

pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod pipeline;
pub mod routing;
pub mod source;
pub mod store;

pub use config::{DatastoreConfig, Pacing, QueueConfig, WorkerConfig};
pub use error::{
    ConfigError, ConnectError, DecodeError, LoggingError, PersistError, PipelineError,
    PipelineResult, SourceError, StoreError,
};
pub use gateway::{persist, PersistStage, PersistedBundle};
pub use logging::{init_logging, LoggingHandle};
pub use pipeline::{CycleOutcome, Pipeline, Stage};
pub use routing::{route, TenantId};
pub use source::{InboundMessage, MessageSource};
pub use store::{
    DatastoreConnector, EncounterRecord, PatientRecord, PractitionerRecord, TenantDatastore,
};

// Re-export shared primitives used in this crate's public API.
pub use ingest_types::{NonEmptyText, StorageId};
