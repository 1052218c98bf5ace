//! FHIR-aligned wire support for inbound clinical-record messages.
//!
//! This crate provides **wire models** and **translation helpers** for the JSON payload carried
//! by each queue message:
//! - a bundle object with `encounter`, `practitioner` and `patient` sections
//! - lenient structural decoding with a best-effort path to the failing field
//!
//! This crate focuses on:
//! - FHIR semantic alignment (resource identifiers, encounter period, status/class)
//! - deserialisation and translation into flat domain structs
//!
//! It performs no I/O and no business validation: a payload is accepted iff it is structurally
//! valid. Absent or `null` values decode as empty strings (or no timestamp), and cross-field
//! rules (for example `period.start <= period.end`) are not enforced.

pub mod bundle;
pub mod encounter;
pub mod patient;
pub mod practitioner;

mod wire;

// Re-export facades
pub use bundle::Bundle;

// Re-export public domain-level types
pub use bundle::BundleData;
pub use encounter::{EncounterData, Period};
pub use patient::PatientData;
pub use practitioner::PractitionerData;

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    /// The payload is not valid JSON or does not match the wire schema.
    ///
    /// `path` is the dotted location of the failing field (`<root>` when the document itself
    /// could not be read).
    #[error("{resource} schema mismatch at {path}: {source}")]
    Schema {
        resource: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
