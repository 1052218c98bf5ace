//! FHIR-aligned patient section of an inbound bundle.
//!
//! Responsibilities:
//! - Define the public domain-level patient type
//! - Define the wire model read from the bundle's `patient` object
//! - Translate wire to domain
//!
//! Notes:
//! - `gender` is carried as free text; no value set is enforced
//! - `birthDate` is kept as the original date string

use crate::wire::null_as_default;
use serde::Deserialize;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for the patient section of a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientData {
    /// Source-system identifier for the patient resource.
    pub fhir_id: String,

    /// Given (first) name.
    pub given_name: String,

    /// Family name (surname).
    pub family_name: String,

    /// Date of birth as sent (normally ISO 8601 `YYYY-MM-DD`).
    pub birth_date: String,

    /// Administrative gender as sent.
    pub gender: String,
}

// ============================================================================
// Wire types (crate-internal)
// ============================================================================

/// Wire representation of the `patient` object.
///
/// Absent or `null` string fields decode as empty strings. Producers send the identifier as
/// `fhirId`, as the resource's own `id`, or both; `fhirId` wins when it is non-empty.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PatientWire {
    #[serde(default)]
    pub fhir_id: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub given_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub family_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub birth_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
}

impl From<PatientWire> for PatientData {
    fn from(wire: PatientWire) -> Self {
        let fhir_id = wire
            .fhir_id
            .filter(|id| !id.is_empty())
            .or(wire.id)
            .unwrap_or_default();

        Self {
            fhir_id,
            given_name: wire.given_name,
            family_name: wire.family_name,
            birth_date: wire.birth_date,
            gender: wire.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fhir_id_key() {
        let wire: PatientWire = serde_json::from_str(
            r#"{"fhirId":"patient-123","givenName":"Maria","familyName":"Silva","birthDate":"1990-01-01","gender":"female"}"#,
        )
        .expect("valid patient");

        let data = PatientData::from(wire);
        assert_eq!(data.fhir_id, "patient-123");
        assert_eq!(data.given_name, "Maria");
        assert_eq!(data.family_name, "Silva");
        assert_eq!(data.birth_date, "1990-01-01");
        assert_eq!(data.gender, "female");
    }

    #[test]
    fn falls_back_to_resource_id() {
        let wire: PatientWire =
            serde_json::from_str(r#"{"id":"patient-9"}"#).expect("valid patient");
        assert_eq!(PatientData::from(wire).fhir_id, "patient-9");
    }

    #[test]
    fn accepts_both_identifier_keys() {
        let wire: PatientWire = serde_json::from_str(r#"{"id":"p-1","fhirId":"patient-123"}"#)
            .expect("both keys are accepted");
        assert_eq!(PatientData::from(wire).fhir_id, "patient-123");

        let wire: PatientWire = serde_json::from_str(r#"{"id":"p-1","fhirId":null}"#)
            .expect("null fhirId is accepted");
        assert_eq!(PatientData::from(wire).fhir_id, "p-1");
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let wire: PatientWire =
            serde_json::from_str(r#"{"fhirId":"patient-123","gender":null,"birthDate":null}"#)
                .expect("null is accepted");
        let data = PatientData::from(wire);
        assert_eq!(data.gender, "");
        assert_eq!(data.birth_date, "");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let wire: PatientWire = serde_json::from_str("{}").expect("empty object is valid");
        let data = PatientData::from(wire);
        assert!(data.fhir_id.is_empty());
        assert!(data.gender.is_empty());
    }

    #[test]
    fn rejects_wrong_field_type() {
        let result = serde_json::from_str::<PatientWire>(r#"{"givenName": 42}"#);
        assert!(result.is_err());
    }
}
