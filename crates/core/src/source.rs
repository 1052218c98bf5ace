//! Message source seam.

use crate::error::SourceError;

/// One message taken off the work queue.
///
/// Immutable and consumed by a single cycle. Acknowledgment/deletion stays with the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    /// Queue-assigned message identifier.
    pub id: String,
    /// Raw message body, expected to be a JSON bundle.
    pub body: String,
    /// Routing attribute; empty when the queue did not supply one.
    pub routing_key: String,
}

/// Receives at most one message per call.
///
/// Implementations long-poll: they wait up to their configured interval before returning
/// `Ok(None)`. Transport and authentication failures map to [`SourceError`].
#[async_trait::async_trait]
pub trait MessageSource: Send + Sync {
    async fn receive_one(&self) -> Result<Option<InboundMessage>, SourceError>;
}
