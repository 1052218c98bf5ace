//! Tenant datastore seam and the typed sub-records written into it.
//!
//! A bundle is stored as three sub-records, one per collection:
//!
//! ```text
//! <tenant database>/
//!   patients        PatientRecord
//!   practitioners   PractitionerRecord
//!   encounters      EncounterRecord  (practitionerId, patientId -> the two above)
//! ```
//!
//! Each record is a concrete struct so a missing field is a compile error rather than an absent
//! document key.

use crate::error::{ConnectError, StoreError};
use crate::routing::TenantId;
use chrono::{DateTime, Utc};
use fhir::{EncounterData, PatientData, Period, PractitionerData};
use ingest_types::StorageId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRecord {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
    pub birth_date: String,
    pub gender: String,
    pub processed_at: DateTime<Utc>,
}

impl PatientRecord {
    pub fn new(patient: &PatientData, processed_at: DateTime<Utc>) -> Self {
        Self {
            fhir_id: patient.fhir_id.clone(),
            given_name: patient.given_name.clone(),
            family_name: patient.family_name.clone(),
            birth_date: patient.birth_date.clone(),
            gender: patient.gender.clone(),
            processed_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PractitionerRecord {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
    pub processed_at: DateTime<Utc>,
}

impl PractitionerRecord {
    pub fn new(practitioner: &PractitionerData, processed_at: DateTime<Utc>) -> Self {
        Self {
            fhir_id: practitioner.fhir_id.clone(),
            given_name: practitioner.given_name.clone(),
            family_name: practitioner.family_name.clone(),
            processed_at,
        }
    }
}

/// Encounter sub-record.
///
/// `practitioner_id` and `patient_id` are storage identifiers assigned to the records written
/// earlier in the same cycle, never identifiers taken from the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterRecord {
    pub fhir_id: String,
    pub full_url: String,
    pub status: String,
    pub class: String,
    pub period: Period,
    pub practitioner_id: StorageId,
    pub patient_id: StorageId,
    pub processed_at: DateTime<Utc>,
}

impl EncounterRecord {
    pub fn new(
        encounter: &EncounterData,
        practitioner_id: StorageId,
        patient_id: StorageId,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fhir_id: encounter.fhir_id.clone(),
            full_url: encounter.full_url.clone(),
            status: encounter.status.clone(),
            class: encounter.class.clone(),
            period: encounter.period,
            practitioner_id,
            patient_id,
            processed_at,
        }
    }
}

/// Opens a session on one tenant's database.
///
/// Called once per processing cycle; handles are not pooled across messages.
#[async_trait::async_trait]
pub trait DatastoreConnector: Send + Sync {
    type Handle: TenantDatastore;

    async fn connect(&self, tenant: TenantId) -> Result<Self::Handle, ConnectError>;
}

/// Append-only writes into one tenant's collections.
///
/// Each insert returns the identifier the datastore assigned to the new record.
#[async_trait::async_trait]
pub trait TenantDatastore: Send + Sync {
    async fn insert_patient(&self, record: &PatientRecord) -> Result<StorageId, StoreError>;

    async fn insert_practitioner(
        &self,
        record: &PractitionerRecord,
    ) -> Result<StorageId, StoreError>;

    async fn insert_encounter(&self, record: &EncounterRecord) -> Result<StorageId, StoreError>;
}
