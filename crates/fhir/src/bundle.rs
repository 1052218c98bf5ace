//! Inbound clinical bundle: one encounter with its practitioner and patient.
//!
//! Wire format is a JSON object with these top-level sections:
//!
//! ```text
//! {
//!   "encounter":    { "fhirId", "fullUrl", "status", "class", "period": { "start", "end" } },
//!   "practitioner": { "fhirId", "givenName", "familyName" },
//!   "patient":      { "fhirId" | "id", "givenName", "familyName", "birthDate", "gender" }
//! }
//! ```
//!
//! A missing or `null` section decodes as an empty one, so the body only has to be a single JSON
//! object whose present fields have the right types. Unknown keys are ignored.

use crate::encounter::{EncounterData, EncounterWire};
use crate::patient::{PatientData, PatientWire};
use crate::practitioner::{PractitionerData, PractitionerWire};
use crate::wire::null_as_default;
use crate::{FhirError, FhirResult};
use serde::Deserialize;

/// Domain-level carrier for a decoded bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleData {
    pub encounter: EncounterData,
    pub practitioner: PractitionerData,
    pub patient: PatientData,
}

/// Bundle operations.
///
/// Zero-sized namespace for bundle parsing; all methods are associated functions.
pub struct Bundle;

impl Bundle {
    /// Parse a bundle from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort path (e.g. `encounter.period.start`)
    /// to the failing field when the JSON does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Schema`] if:
    /// - the text is not a single JSON object,
    /// - any present field has an unexpected type or a timestamp is not RFC 3339.
    pub fn parse(json_text: &str) -> FhirResult<BundleData> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, BundleWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                return Err(schema_error(path, source));
            }
        };

        // Reject trailing content such as `{...} garbage`.
        deserializer
            .end()
            .map_err(|source| schema_error(String::new(), source))?;

        Ok(wire.into())
    }
}

fn schema_error(path: String, source: serde_json::Error) -> FhirError {
    // serde_path_to_error renders the root as "."
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    FhirError::Schema {
        resource: "Bundle",
        path,
        source,
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct BundleWire {
    #[serde(default, deserialize_with = "null_as_default")]
    encounter: EncounterWire,
    #[serde(default, deserialize_with = "null_as_default")]
    practitioner: PractitionerWire,
    #[serde(default, deserialize_with = "null_as_default")]
    patient: PatientWire,
}

impl From<BundleWire> for BundleData {
    fn from(wire: BundleWire) -> Self {
        Self {
            encounter: wire.encounter.into(),
            practitioner: wire.practitioner.into(),
            patient: wire.patient.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "encounter": {
            "fhirId": "123",
            "fullUrl": "urn:uuid:123",
            "status": "finished",
            "class": "outpatient",
            "period": {
                "start": "2023-01-01T10:00:00Z",
                "end": "2023-01-01T11:00:00Z"
            },
            "practitionerId": "dr-smith",
            "patientId": "patient-123"
        },
        "practitioner": {
            "fhirId": "dr-smith",
            "givenName": "John",
            "familyName": "Smith"
        },
        "patient": {
            "fhirId": "patient-123",
            "givenName": "Maria",
            "familyName": "Silva",
            "birthDate": "1990-01-01",
            "gender": "female"
        }
    }"#;

    #[test]
    fn parses_sample_bundle() {
        let bundle = Bundle::parse(SAMPLE).expect("parse bundle");

        assert_eq!(bundle.encounter.fhir_id, "123");
        assert_eq!(bundle.encounter.full_url, "urn:uuid:123");
        assert_eq!(bundle.encounter.status, "finished");
        assert_eq!(bundle.practitioner.fhir_id, "dr-smith");
        assert_eq!(bundle.practitioner.family_name, "Smith");
        assert_eq!(bundle.patient.fhir_id, "patient-123");
        assert_eq!(bundle.patient.birth_date, "1990-01-01");
    }

    #[test]
    fn parsing_is_deterministic() {
        let first = Bundle::parse(SAMPLE).expect("first parse");
        let second = Bundle::parse(SAMPLE).expect("second parse");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Bundle::parse("invalid json").expect_err("should reject");
        let FhirError::Schema { path, .. } = err;
        assert_eq!(path, "<root>");
    }

    #[test]
    fn rejects_empty_body() {
        assert!(Bundle::parse("").is_err());
    }

    #[test]
    fn missing_sections_decode_as_empty() {
        let input = r#"{
            "encounter": {"fhirId": "123"},
            "practitioner": null
        }"#;

        let bundle = Bundle::parse(input).expect("absent sections are empty");
        assert_eq!(bundle.encounter.fhir_id, "123");
        assert!(bundle.encounter.period.start.is_none());
        assert!(bundle.practitioner.fhir_id.is_empty());
        assert!(bundle.patient.fhir_id.is_empty());
    }

    #[test]
    fn accepts_patient_with_both_identifier_keys() {
        let input = SAMPLE.replace(
            r#""fhirId": "patient-123""#,
            r#""id": "p-1", "fhirId": "patient-123""#,
        );

        let bundle = Bundle::parse(&input).expect("id and fhirId together");
        assert_eq!(bundle.patient.fhir_id, "patient-123");
    }

    #[test]
    fn accepts_null_string_fields() {
        let input = SAMPLE
            .replace(r#""female""#, "null")
            .replace(r#""Smith""#, "null");

        let bundle = Bundle::parse(&input).expect("null strings are empty");
        assert_eq!(bundle.patient.gender, "");
        assert_eq!(bundle.practitioner.family_name, "");
        assert_eq!(bundle.patient.fhir_id, "patient-123");
    }

    #[test]
    fn rejects_non_object_body() {
        let err = Bundle::parse("42").expect_err("scalar body");
        let FhirError::Schema { path, .. } = err;
        assert_eq!(path, "<root>");
    }

    #[test]
    fn rejects_wrongly_typed_section() {
        let err = Bundle::parse(r#"{"patient": "patient-123"}"#).expect_err("string section");
        let FhirError::Schema { path, .. } = err;
        assert_eq!(path, "patient");
    }

    #[test]
    fn reports_path_of_failing_field() {
        let input = SAMPLE.replace("2023-01-01T10:00:00Z", "not-a-time");

        let err = Bundle::parse(&input).expect_err("bad timestamp");
        let FhirError::Schema { path, .. } = err;
        assert_eq!(path, "encounter.period.start");
    }

    #[test]
    fn rejects_trailing_content() {
        let input = format!("{SAMPLE} trailing");
        assert!(Bundle::parse(&input).is_err());
    }

    #[test]
    fn ignores_unknown_top_level_keys() {
        let input = SAMPLE.replacen('{', r#"{"meta": {"source": "hca"},"#, 1);
        let bundle = Bundle::parse(&input).expect("unknown keys are ignored");
        assert_eq!(bundle.encounter.fhir_id, "123");
    }
}
