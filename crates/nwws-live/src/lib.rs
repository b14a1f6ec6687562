#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
//! Live WebSocket fan-out hub. Consumes [`nwws_model::Envelope`]s off
//! the bus, keeps one in-memory view of the `warnings` topic, and
//! streams it to every connected client plus a full snapshot on
//! subscribe (`SPEC_FULL.md` sections 4.10, 5, 6).

pub mod config;
pub mod error;
pub mod hub;
pub mod manager;
pub mod protocol;
pub mod server;

pub use error::HubError;
pub use hub::LiveHub;
pub use manager::WarningManager;
