use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),

    #[error("failed to encode envelope: {0}")]
    Encode(#[from] serde_json::Error),
}
