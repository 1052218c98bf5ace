//! Persistence gateway.
//!
//! Writes a decoded bundle into a tenant datastore as three linked sub-records, in order:
//!
//! 1. patient, capturing its storage identifier
//! 2. practitioner, capturing its storage identifier
//! 3. encounter, embedding both identifiers as `practitionerId`/`patientId`
//!
//! ## Consistency
//!
//! The three inserts are independent and **not** transactional. If step N fails, steps 1..N-1
//! have already taken effect and are left in place: a failed practitioner or encounter insert
//! leaves a patient (and possibly a practitioner) without an encounter linking it. The returned
//! [`PersistError`] names the failing stage and the identifiers already written so the orphans
//! can be found from the logs.

use crate::error::{PersistError, StoreError};
use crate::store::{EncounterRecord, PatientRecord, PractitionerRecord, TenantDatastore};
use chrono::Utc;
use fhir::BundleData;
use ingest_types::StorageId;

/// Which of the three inserts failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    Patient,
    Practitioner,
    Encounter,
}

impl std::fmt::Display for PersistStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PersistStage::Patient => "patient",
            PersistStage::Practitioner => "practitioner",
            PersistStage::Encounter => "encounter",
        })
    }
}

/// Storage identifiers of a fully written bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBundle {
    pub patient_id: StorageId,
    pub practitioner_id: StorageId,
    pub encounter_id: StorageId,
}

/// Persist a bundle through an exclusively held tenant handle.
///
/// The handle is consumed: it serves exactly this bundle's writes and is dropped afterwards.
///
/// # Errors
///
/// Returns [`PersistError`] on the first failed insert. Earlier inserts are not undone.
pub async fn persist<D: TenantDatastore>(
    handle: D,
    bundle: &BundleData,
) -> Result<PersistedBundle, PersistError> {
    tracing::debug!(fhir_id = %bundle.patient.fhir_id, "inserting patient");
    let patient = PatientRecord::new(&bundle.patient, Utc::now());
    let patient_id = handle
        .insert_patient(&patient)
        .await
        .map_err(|source| failed(PersistStage::Patient, None, None, source))?;
    tracing::info!(fhir_id = %patient.fhir_id, storage_id = %patient_id, "patient stored");

    tracing::debug!(fhir_id = %bundle.practitioner.fhir_id, "inserting practitioner");
    let practitioner = PractitionerRecord::new(&bundle.practitioner, Utc::now());
    let practitioner_id = handle
        .insert_practitioner(&practitioner)
        .await
        .map_err(|source| {
            failed(
                PersistStage::Practitioner,
                Some(patient_id.clone()),
                None,
                source,
            )
        })?;
    tracing::info!(
        fhir_id = %practitioner.fhir_id,
        storage_id = %practitioner_id,
        "practitioner stored"
    );

    tracing::debug!(fhir_id = %bundle.encounter.fhir_id, "inserting encounter");
    let encounter = EncounterRecord::new(
        &bundle.encounter,
        practitioner_id.clone(),
        patient_id.clone(),
        Utc::now(),
    );
    let encounter_id = handle.insert_encounter(&encounter).await.map_err(|source| {
        failed(
            PersistStage::Encounter,
            Some(patient_id.clone()),
            Some(practitioner_id.clone()),
            source,
        )
    })?;
    tracing::info!(
        fhir_id = %encounter.fhir_id,
        storage_id = %encounter_id,
        "encounter stored"
    );

    Ok(PersistedBundle {
        patient_id,
        practitioner_id,
        encounter_id,
    })
}

fn failed(
    stage: PersistStage,
    patient_id: Option<StorageId>,
    practitioner_id: Option<StorageId>,
    source: StoreError,
) -> PersistError {
    PersistError {
        stage,
        patient_id,
        practitioner_id,
        source,
    }
}
