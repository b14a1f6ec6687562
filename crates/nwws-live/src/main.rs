use clap::Parser;
use tracing_subscriber::EnvFilter;

use nwws_bus::AmqpConsumer;
use nwws_live::config::Config;
use nwws_live::hub::LiveHub;
use nwws_live::server;

#[derive(Parser, Debug)]
#[command(name = "nwws-live", about = "Live WebSocket fan-out hub for the VTEC warning feed")]
struct Args {
    /// Load environment variables from this file before reading config.
    #[arg(long)]
    env_file: Option<std::path::PathBuf>,

    /// Override the `tracing` log level (e.g. `debug`, `nwws_live=trace`).
    #[arg(long)]
    log_level: Option<String>,

    /// Override the bound TCP port.
    #[arg(long)]
    port: Option<u16>,
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
        .unwrap_or_else(|| EnvFilter::from_default_env().add_directive("nwws_live=info".parse().unwrap()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env(args.port)?;

    let store = nwws_store::InMemoryWarningStore::new();

    let connection = nwws_bus::connect(&nwws_bus::BusConfig {
        amqp_url: config.amqp_url.clone(),
        hub_name: config.hub_name.clone(),
    })
    .await?;
    let channel = connection.create_channel().await?;
    let consumer = AmqpConsumer::new(&channel, &config.hub_name).await?;

    let hub = LiveHub::start(&store, consumer).await?;

    server::serve(hub, config.bind_addr).await
}
