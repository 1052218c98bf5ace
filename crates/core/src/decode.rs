//! Payload decoding for inbound messages.

use crate::error::DecodeError;
use crate::source::InboundMessage;
use fhir::{Bundle, BundleData};

/// Decode a message body into a bundle.
///
/// Structural only and free of I/O, so a failure here never reaches a datastore.
///
/// # Errors
///
/// Returns [`DecodeError`] carrying the message id and original body when the body is not a
/// structurally valid bundle.
pub fn decode(message: &InboundMessage) -> Result<BundleData, DecodeError> {
    Bundle::parse(&message.body).map_err(|source| DecodeError {
        message_id: message.id.clone(),
        raw: message.body.clone(),
        source,
    })
}

/// Render a body as indented JSON for logs, falling back to the raw text.
pub fn pretty_body(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string())
}
