use std::io::BufRead;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nwws_bus::AmqpPublisher;
use nwws_engine::{VtecEngine, WarningProjector};
use nwws_ingest::{pipeline, Config, IngressEnvelope};
use nwws_store::{InMemoryEventStore, InMemoryWarningStore, InMemoryZoneSource, ZoneLookup};

#[derive(Parser, Debug)]
#[command(name = "nwws-ingest", about = "Parses AWIPS text products and drives the VTEC warning engine")]
struct Args {
    /// Load environment variables from this file before reading config.
    #[arg(long)]
    env_file: Option<std::path::PathBuf>,

    /// Override the `tracing` log level (e.g. `debug`, `nwws_ingest=trace`).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.env_file {
        dotenvy::from_path(path)?;
    } else {
        let _ = dotenvy::dotenv();
    }

    let filter = args
        .log_level
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::from_default_env().add_directive("nwws_ingest=info".parse().unwrap()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let connection = nwws_bus::connect(&nwws_bus::BusConfig {
        amqp_url: config.amqp_url.clone(),
        hub_name: config.hub_name.clone(),
    })
    .await?;
    let channel = connection.create_channel().await?;
    let publisher = AmqpPublisher::new(channel).await?;

    let events = InMemoryEventStore::new();
    let warnings = InMemoryWarningStore::new();
    let zones = ZoneLookup::load(&InMemoryZoneSource::new(vec![])).await?;
    let engine = VtecEngine::new(events, WarningProjector::new(warnings, publisher));

    tracing::info!("reading ingress envelopes from stdin");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let envelope: IngressEnvelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed ingress envelope");
                continue;
            }
        };
        if let Err(err) = pipeline::process_envelope(&engine, &zones, &envelope).await {
            tracing::warn!(error = %err, "failed to process envelope");
        }
    }

    Ok(())
}
