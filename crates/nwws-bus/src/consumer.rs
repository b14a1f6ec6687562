use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{Channel, Consumer, ExchangeKind};

use nwws_model::Envelope;

use crate::error::BusError;
use crate::routing::{EXCHANGE, ROUTING_KEY_WARNING};

/// A consumer bound to [`EXCHANGE`] on its own non-durable, exclusive,
/// broker-named queue. Each hub instance gets a fresh queue on every
/// connect — fan-out, not work-sharing, so there's nothing to persist
/// across a restart.
pub struct AmqpConsumer {
    consumer: Consumer,
}

impl AmqpConsumer {
    pub async fn new(channel: &Channel, hub_name: &str) -> Result<Self, BusError> {
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

        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    durable: false,
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        let queue_name = queue.name().as_str();
        channel
            .queue_bind(
                queue_name,
                EXCHANGE,
                ROUTING_KEY_WARNING,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;

        let consumer = channel
            .basic_consume(
                queue_name,
                &format!("{hub_name}-consumer"),
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        Ok(Self { consumer })
    }

    /// Awaits the next envelope, acking the delivery once it's
    /// successfully decoded. Returns `None` when the underlying
    /// channel closes.
    pub async fn recv(&mut self) -> Option<Result<Envelope, BusError>> {
        let delivery = match self.consumer.next().await? {
            Ok(delivery) => delivery,
            Err(err) => return Some(Err(err.into())),
        };
        let result = serde_json::from_slice::<Envelope>(&delivery.data).map_err(BusError::from);
        if let Err(err) = delivery.ack(BasicAckOptions::default()).await {
            return Some(Err(err.into()));
        }
        Some(result)
    }
}
