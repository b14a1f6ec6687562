use thiserror::Error;

/// Per-envelope failure. `Malformed` and `Parse` are logged and the
/// envelope is skipped; `Engine` (store/commit failures) propagates to
/// the message handler so the delivery can be nacked and redelivered.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed ingress envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(#[from] nwws_parser::ParseError),

    #[error("engine error: {0}")]
    Engine(#[from] nwws_engine::EngineError),
}
