use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("store error: {0}")]
    Store(#[from] nwws_store::StoreError),

    #[error("bus error: {0}")]
    Bus(#[from] nwws_bus::BusError),

    #[error("malformed client message: {0}")]
    ClientProtocol(String),
}
