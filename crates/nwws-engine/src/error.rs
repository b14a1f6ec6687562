use thiserror::Error;

/// Engine error taxonomy, the `TransientInfra`/`FatalInfra` half of
/// `SPEC_FULL.md` section 7 not already covered by
/// [`nwws_parser::ParseError`]. A descriptor-scoped error is always
/// logged and the loop continues to the next descriptor; only a
/// `Store` failure on `commit` propagates to the caller, who nacks the
/// delivery.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] nwws_store::StoreError),

    #[error("no zones resolved for a non-wildcard UGC entry in event {0}")]
    NoZonesResolved(String),

    #[error("publish failed: {0}")]
    Publish(String),
}
