//! BSON document shapes of the three sub-record collections.
//!
//! Field names are camelCase. Timestamps are stored as BSON dates and encounter references as
//! `ObjectId`s, so `encounters.patientId` can be joined against `patients._id` directly.

use ingest_core::{EncounterRecord, PatientRecord, PractitionerRecord, StorageId, StoreError};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime as BsonDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDocument {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
    pub birth_date: String,
    pub gender: String,
    pub processed_at: BsonDateTime,
}

impl From<&PatientRecord> for PatientDocument {
    fn from(record: &PatientRecord) -> Self {
        Self {
            fhir_id: record.fhir_id.clone(),
            given_name: record.given_name.clone(),
            family_name: record.family_name.clone(),
            birth_date: record.birth_date.clone(),
            gender: record.gender.clone(),
            processed_at: bson_date(record.processed_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerDocument {
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
    pub processed_at: BsonDateTime,
}

impl From<&PractitionerRecord> for PractitionerDocument {
    fn from(record: &PractitionerRecord) -> Self {
        Self {
            fhir_id: record.fhir_id.clone(),
            given_name: record.given_name.clone(),
            family_name: record.family_name.clone(),
            processed_at: bson_date(record.processed_at),
        }
    }
}

/// A bound the message did not carry is stored as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodDocument {
    pub start: Option<BsonDateTime>,
    pub end: Option<BsonDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDocument {
    pub fhir_id: String,
    pub full_url: String,
    pub status: String,
    pub class: String,
    pub period: PeriodDocument,
    pub practitioner_id: ObjectId,
    pub patient_id: ObjectId,
    pub processed_at: BsonDateTime,
}

impl EncounterDocument {
    /// Build the document, turning the captured storage ids back into `ObjectId`s.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a reference is not a 24-character hex `ObjectId`.
    pub fn from_record(record: &EncounterRecord, collection: &'static str) -> Result<Self, StoreError> {
        Ok(Self {
            fhir_id: record.fhir_id.clone(),
            full_url: record.full_url.clone(),
            status: record.status.clone(),
            class: record.class.clone(),
            period: PeriodDocument {
                start: record.period.start.map(bson_date),
                end: record.period.end.map(bson_date),
            },
            practitioner_id: object_id(&record.practitioner_id, collection)?,
            patient_id: object_id(&record.patient_id, collection)?,
            processed_at: bson_date(record.processed_at),
        })
    }
}

fn bson_date(at: chrono::DateTime<chrono::Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(at.timestamp_millis())
}

fn object_id(id: &StorageId, collection: &'static str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| StoreError::new(collection, format!("invalid reference {id}: {e}")))
}
