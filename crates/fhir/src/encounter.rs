//! FHIR-aligned encounter section of an inbound bundle.
//!
//! The encounter links a patient and a practitioner. On the wire it may carry
//! `practitionerId`/`patientId` values from the producing system; those are **not** decoded.
//! Reference fields are only ever derived from the identifiers a datastore assigns when the
//! patient and practitioner records are stored.

use chrono::{DateTime, Utc};
use crate::wire::null_as_default;
use serde::Deserialize;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Time window of an encounter.
///
/// A bound is `None` when the producer left it out or sent `null`. No ordering between `start`
/// and `end` is enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Period {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Domain-level carrier for the encounter section of a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterData {
    /// Source-system identifier for the encounter resource.
    pub fhir_id: String,

    /// Canonical URL of the encounter (for example `urn:uuid:...`).
    pub full_url: String,

    /// Encounter status as sent (`planned`, `finished`, ...).
    pub status: String,

    /// Encounter class as sent (`outpatient`, `inpatient`, ...).
    pub class: String,

    pub period: Period,
}

// ============================================================================
// Wire types (crate-internal)
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EncounterWire {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fhir_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub full_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub class: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub period: PeriodWire,
}

/// Bounds are optional, but a present bound must be an RFC 3339 timestamp.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct PeriodWire {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl From<EncounterWire> for EncounterData {
    fn from(wire: EncounterWire) -> Self {
        Self {
            fhir_id: wire.fhir_id,
            full_url: wire.full_url,
            status: wire.status,
            class: wire.class,
            period: Period {
                start: wire.period.start,
                end: wire.period.end,
            },
        }
    }
}
