//! Pipeline driver.
//!
//! Runs one message at a time through Polling → Routing → Decoding → Connecting → Persisting and
//! then polls again. There is no terminal state: the loop ends only with the process.
//!
//! | Outcome                         | Next poll                        |
//! |---------------------------------|----------------------------------|
//! | message persisted               | immediately                      |
//! | unknown tenant / decode failure | immediately, message dropped     |
//! | connect / persist failure       | immediately, partial writes kept |
//! | queue empty                     | after [`Pacing::idle`]           |
//! | message source failure          | after [`Pacing::source_error`]   |
//!
//! A failed message is neither retried nor dead-lettered by the driver.

use crate::config::Pacing;
use crate::decode::{decode, pretty_body};
use crate::error::{PipelineError, PipelineResult};
use crate::gateway::{persist, PersistedBundle};
use crate::routing::{route, TenantId};
use crate::source::{InboundMessage, MessageSource};
use crate::store::DatastoreConnector;
use std::time::Duration;

/// States a message passes through within one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Polling,
    Routing,
    Decoding,
    Connecting,
    Persisting,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Polling => "polling",
            Stage::Routing => "routing",
            Stage::Decoding => "decoding",
            Stage::Connecting => "connecting",
            Stage::Persisting => "persisting",
        })
    }
}

/// Result of a single pass through the pipeline.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The queue had no message within the poll wait.
    Idle,
    /// The message's three sub-records were written.
    Completed {
        message_id: String,
        tenant: TenantId,
        persisted: PersistedBundle,
    },
    /// The cycle stopped at `error.stage()`. `message_id` is `None` when polling itself failed.
    Failed {
        message_id: Option<String>,
        error: PipelineError,
    },
}

impl CycleOutcome {
    /// Delay before the next poll, if any.
    pub fn pause(&self, pacing: &Pacing) -> Option<Duration> {
        match self {
            CycleOutcome::Idle => Some(pacing.idle),
            CycleOutcome::Failed {
                error: PipelineError::SourceUnavailable(_),
                ..
            } => Some(pacing.source_error),
            CycleOutcome::Completed { .. } | CycleOutcome::Failed { .. } => None,
        }
    }
}

/// The ingestion control loop.
///
/// Single task, strictly sequential: a message is fully processed before the next receive.
pub struct Pipeline<S, C> {
    source: S,
    connector: C,
    pacing: Pacing,
}

impl<S, C> Pipeline<S, C>
where
    S: MessageSource,
    C: DatastoreConnector,
{
    pub fn new(source: S, connector: C, pacing: Pacing) -> Self {
        Self {
            source,
            connector,
            pacing,
        }
    }

    /// Poll, process and pace forever.
    pub async fn run(&self) {
        tracing::info!(
            idle_pause_ms = self.pacing.idle.as_millis() as u64,
            source_error_pause_ms = self.pacing.source_error.as_millis() as u64,
            "pipeline started"
        );

        loop {
            let outcome = self.run_cycle().await;
            if let Some(pause) = outcome.pause(&self.pacing) {
                tokio::time::sleep(pause).await;
            }
        }
    }

    /// Run exactly one cycle and report how it ended. Never sleeps; pacing is left to the caller.
    pub async fn run_cycle(&self) -> CycleOutcome {
        tracing::debug!(stage = %Stage::Polling, "receiving one message");
        let message = match self.source.receive_one().await {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::debug!("no message available");
                return CycleOutcome::Idle;
            }
            Err(err) => {
                tracing::warn!(stage = %Stage::Polling, error = %err, "failed to receive message");
                return CycleOutcome::Failed {
                    message_id: None,
                    error: err.into(),
                };
            }
        };

        tracing::info!(
            message_id = %message.id,
            routing_key = %message.routing_key,
            "message received"
        );
        tracing::debug!(message_id = %message.id, body = %pretty_body(&message.body), "message body");

        match self.process(&message).await {
            Ok((tenant, persisted)) => {
                tracing::info!(
                    message_id = %message.id,
                    %tenant,
                    encounter_id = %persisted.encounter_id,
                    "message processed"
                );
                CycleOutcome::Completed {
                    message_id: message.id,
                    tenant,
                    persisted,
                }
            }
            Err(error) => {
                log_failure(&message, &error);
                CycleOutcome::Failed {
                    message_id: Some(message.id),
                    error,
                }
            }
        }
    }

    async fn process(&self, message: &InboundMessage) -> PipelineResult<(TenantId, PersistedBundle)> {
        let tenant =
            route(&message.routing_key).ok_or_else(|| PipelineError::UnknownTenant {
                routing_key: message.routing_key.clone(),
            })?;

        let bundle = decode(message)?;

        tracing::debug!(message_id = %message.id, %tenant, "connecting to tenant datastore");
        let handle = self.connector.connect(tenant).await?;

        let persisted = persist(handle, &bundle).await?;
        Ok((tenant, persisted))
    }
}

fn log_failure(message: &InboundMessage, error: &PipelineError) {
    let stage = error.stage();
    match error {
        PipelineError::Decode(err) => {
            tracing::error!(
                message_id = %message.id,
                %stage,
                error = %err,
                raw = %err.raw,
                "dropping message"
            );
        }
        PipelineError::Persist(err) if !err.orphaned().is_empty() => {
            tracing::error!(
                message_id = %message.id,
                %stage,
                error = %err,
                patient_id = ?err.patient_id.as_ref().map(|id| id.as_str()),
                practitioner_id = ?err.practitioner_id.as_ref().map(|id| id.as_str()),
                "partial write left records without an encounter"
            );
        }
        _ => {
            tracing::error!(message_id = %message.id, %stage, error = %error, "dropping message");
        }
    }
}
