//! The outbound half of the engine's boundary: publishing an
//! [`Envelope`] onto the bus. `nwws-bus` implements this trait over a
//! `lapin` channel; tests implement it over a `Vec`.

use nwws_model::Envelope;

use crate::error::EngineError;

pub trait EventPublisher: Send + Sync {
    fn publish(&self, envelope: Envelope) -> impl std::future::Future<Output = Result<(), EngineError>> + Send;
}
