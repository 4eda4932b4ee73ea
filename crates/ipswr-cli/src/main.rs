//! ipswr CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ipswr_cli::{Cli, Commands, cmd};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            os,
            version,
            device,
            offline,
            json,
            dataset,
        } => cmd::resolve::resolve(&os, &version, device, offline, json, dataset).await,
        Commands::Sync { dataset } => cmd::sync::sync(dataset).await,
    }
}
