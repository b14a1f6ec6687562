#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
//! AMQP bridge carrying [`nwws_model::Envelope`]s from the VTEC engine
//! to the live warning hub (`SPEC_FULL.md` section 10.4). A durable
//! direct exchange; each hub consumes on its own non-durable, exclusive
//! queue, since every hub wants every envelope and none need survive a
//! restart.

mod config;
mod consumer;
mod error;
mod publisher;
pub mod routing;

pub use config::BusConfig;
pub use consumer::AmqpConsumer;
pub use error::BusError;
pub use publisher::AmqpPublisher;

use lapin::{Connection, ConnectionProperties};

pub async fn connect(config: &BusConfig) -> Result<Connection, BusError> {
    let connection = Connection::connect(&config.amqp_url, ConnectionProperties::default()).await?;
    Ok(connection)
}
