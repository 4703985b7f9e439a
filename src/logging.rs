//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Build the filter directive string.
///
/// Priority: explicit override (CLI), then `RUST_LOG`, then the configured level.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, cli_override: Option<String>) -> String {
    cli_override
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| format!("hayfever={0},tower_http={0}", config.level))
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig, cli_override: Option<String>) -> Result<()> {
    let directive = filter_directive(config, cli_override);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
    .with_context(|| "Failed to install tracing subscriber")?;

    Ok(())
}
