//! Environment-sourced configuration for the `nwws-live` binary.

use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub amqp_url: String,
    pub hub_name: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env(port: Option<u16>) -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
        let amqp_url = std::env::var("RABBIT_URL").unwrap_or_else(|_| "amqp://127.0.0.1:5672/%2f".to_string());
        let hub_name = std::env::var("NWWS_LIVE_HUB_NAME").unwrap_or_else(|_| "nwws-live".to_string());
        let port = port.unwrap_or_else(|| {
            std::env::var("NWWS_LIVE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8090)
        });
        let bind_addr: SocketAddr = ([0, 0, 0, 0], port).into();

        Ok(Self {
            database_url,
            amqp_url,
            hub_name,
            bind_addr,
        })
    }
}
