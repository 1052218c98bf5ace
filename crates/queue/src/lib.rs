//! SQS message source.
//!
//! Long-polls a single queue for one message at a time and hands it to the pipeline with its
//! `MessageGroupId` as the routing key. Messages are never deleted here; visibility timeout and
//! redrive policy on the queue decide what happens to them afterwards.

use aws_sdk_sqs::config::{Credentials, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{Message, MessageSystemAttributeName};
use aws_sdk_sqs::Client;
use ingest_core::constants::ROUTING_ATTRIBUTE;
use ingest_core::{InboundMessage, MessageSource, QueueConfig, SourceError};

/// Provider name reported for the static credentials built from configuration.
const CREDENTIALS_PROVIDER: &str = "ingest-static";

pub struct SqsSource {
    client: Client,
    queue_url: String,
    wait_seconds: i32,
}

impl SqsSource {
    /// Build an SQS client for `config` (region, endpoint override, static credentials).
    ///
    /// No request is made here; an unreachable queue shows up as [`SourceError`] on the first
    /// receive.
    pub async fn connect(config: &QueueConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint_url.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        tracing::info!(
            queue_url = %config.queue_url,
            region = %config.region,
            endpoint = %config.endpoint_url,
            "sqs client configured"
        );

        Self::with_client(Client::new(&shared), config)
    }

    pub fn with_client(client: Client, config: &QueueConfig) -> Self {
        Self {
            client,
            queue_url: config.queue_url.as_str().to_string(),
            wait_seconds: config.wait_seconds,
        }
    }
}

#[async_trait::async_trait]
impl MessageSource for SqsSource {
    async fn receive_one(&self) -> Result<Option<InboundMessage>, SourceError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(self.wait_seconds)
            .message_system_attribute_names(routing_attribute())
            .send()
            .await
            .map_err(|err| SourceError::new(DisplayErrorContext(&err).to_string()))?;

        Ok(output.messages().first().map(to_inbound))
    }
}

fn routing_attribute() -> MessageSystemAttributeName {
    MessageSystemAttributeName::from(ROUTING_ATTRIBUTE)
}

/// Missing id, body or routing attribute become empty strings; later stages reject them.
fn to_inbound(message: &Message) -> InboundMessage {
    let routing_key = message
        .attributes()
        .and_then(|attributes| attributes.get(&routing_attribute()))
        .cloned()
        .unwrap_or_default();

    InboundMessage {
        id: message.message_id().unwrap_or_default().to_string(),
        body: message.body().unwrap_or_default().to_string(),
        routing_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_group_id_to_routing_key() {
        let message = Message::builder()
            .message_id("test-message")
            .body(r#"{"encounter":{}}"#)
            .attributes(MessageSystemAttributeName::MessageGroupId, "001")
            .attributes(MessageSystemAttributeName::SenderId, "AIDAEXAMPLE")
            .build();

        let inbound = to_inbound(&message);
        assert_eq!(inbound.id, "test-message");
        assert_eq!(inbound.body, r#"{"encounter":{}}"#);
        assert_eq!(inbound.routing_key, "001");
    }

    #[test]
    fn routing_attribute_is_message_group_id() {
        assert_eq!(routing_attribute(), MessageSystemAttributeName::MessageGroupId);
    }

    #[test]
    fn missing_fields_become_empty() {
        let inbound = to_inbound(&Message::builder().build());
        assert_eq!(inbound.id, "");
        assert_eq!(inbound.body, "");
        assert_eq!(inbound.routing_key, "");
        assert_eq!(ingest_core::route(&inbound.routing_key), None);
    }
}
