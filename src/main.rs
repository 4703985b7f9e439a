//! Hayfever gateway entry point.
//!
//! Loads configuration, initializes tracing, builds the Google Pollen client
//! and serves `GET /api/pollen` until interrupted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hayfever::{AppState, GooglePollenClient, HayfeverConfig, logging, web};

/// Hayfever: grass pollen severity for a coordinate
#[derive(Parser, Debug)]
#[command(name = "hayfever", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter (e.g. "hayfever=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = HayfeverConfig::load_from_path(args.config)?;
    logging::init(&config.logging, args.log_level)?;

    if config.api_key_missing() {
        tracing::warn!("No API key configured - Google Pollen API calls will fail");
    }

    let client = GooglePollenClient::new(&config.pollen)?;
    web::run(&config.server, AppState::new(client)).await
}
