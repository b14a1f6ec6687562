//! Environment-sourced configuration for the `nwws-ingest` binary.
//!
//! The upstream NWWS-OI XMPP transport is out of scope for this crate
//! (`SPEC_FULL.md` section 1); its credentials are still read here so a
//! future transport adapter can be dropped in without a config change.

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub amqp_url: String,
    pub hub_name: String,

    pub nwwsoi_server: Option<String>,
    pub nwwsoi_room: Option<String>,
    pub nwwsoi_user: Option<String>,
    pub nwwsoi_pass: Option<String>,
    pub nwwsoi_resource: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()),
            amqp_url: std::env::var("RABBIT_URL").unwrap_or_else(|_| "amqp://127.0.0.1:5672/%2f".to_string()),
            hub_name: std::env::var("NWWS_INGEST_HUB_NAME").unwrap_or_else(|_| "nwws-ingest".to_string()),
            nwwsoi_server: std::env::var("NWWSOI_SERVER").ok(),
            nwwsoi_room: std::env::var("NWWSOI_ROOM").ok(),
            nwwsoi_user: std::env::var("NWWSOI_USER").ok(),
            nwwsoi_pass: std::env::var("NWWSOI_PASS").ok(),
            nwwsoi_resource: std::env::var("NWWSOI_RESOURCE").ok(),
        })
    }
}
