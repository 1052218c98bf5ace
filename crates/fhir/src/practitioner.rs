//! FHIR-aligned practitioner section of an inbound bundle.

use crate::wire::null_as_default;
use serde::Deserialize;

/// Domain-level carrier for the practitioner section of a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PractitionerData {
    /// Source-system identifier for the practitioner resource.
    pub fhir_id: String,
    pub given_name: String,
    pub family_name: String,
}

/// Wire representation of the `practitioner` object. Absent or `null` fields decode as empty
/// strings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PractitionerWire {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fhir_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub given_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub family_name: String,
}

impl From<PractitionerWire> for PractitionerData {
    fn from(wire: PractitionerWire) -> Self {
        Self {
            fhir_id: wire.fhir_id,
            given_name: wire.given_name,
            family_name: wire.family_name,
        }
    }
}
