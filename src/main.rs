//! treaty-links server binary

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treaty_links::cli::Cli;
use treaty_links::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        integrity = ?config.store.link_integrity,
        seed = config.store.seed_sample_data,
        prefix = %config.server.api_prefix,
        "starting treaty-links"
    );

    ServerBuilder::from_config(config).await?.serve().await
}
