use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, ExchangeKind};

use nwws_engine::{EngineError, EventPublisher};
use nwws_model::Envelope;

use crate::error::BusError;
use crate::routing::{EXCHANGE, ROUTING_KEY_WARNING};

/// Publishes envelopes onto the shared [`EXCHANGE`]. Implements
/// [`EventPublisher`] so a [`nwws_engine::WarningProjector`] can be
/// built directly against it.
pub struct AmqpPublisher {
    channel: Channel,
}

impl AmqpPublisher {
    pub async fn new(channel: Channel) -> Result<Self, BusError> {
        channel
            .exchange_declare(
                EXCHANGE,
                ExchangeKind::Direct,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        Ok(Self { channel })
    }

    async fn publish_envelope(&self, envelope: &Envelope) -> Result<(), BusError> {
        let body = serde_json::to_vec(envelope)?;
        self.channel
            .basic_publish(
                EXCHANGE,
                ROUTING_KEY_WARNING,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_message_id(envelope.id.clone().into()),
            )
            .await?
            .await?;
        Ok(())
    }
}

impl EventPublisher for AmqpPublisher {
    async fn publish(&self, envelope: Envelope) -> Result<(), EngineError> {
        self.publish_envelope(&envelope)
            .await
            .map_err(|err| EngineError::Publish(err.to_string()))
    }
}
