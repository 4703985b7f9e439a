//! Pollen forecast module
//!
//! This module provides the pollen severity pipeline:
//! - `ForecastSource`: narrow seam over the upstream forecast provider
//! - Google Pollen API client implementing that seam
//! - Grass index extraction and classification into a `PollenReport`

pub mod extract;
pub mod google;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::GatewayError;
use crate::models::{Coordinate, PollenReport};

pub use extract::{GRASS_CODE, IndexInfo, grass_index};
pub use google::GooglePollenClient;

/// Unparsed provider reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawForecast {
    /// HTTP status returned by the provider
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawForecast {
    #[must_use]
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the provider answered with a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Upstream forecast provider.
///
/// Implementations make exactly one attempt. `Err` is reserved for transport
/// failures; any HTTP response, including error statuses, comes back as `Ok`.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> anyhow::Result<RawForecast>;
}

/// Look up today's grass pollen severity for a coordinate.
#[instrument(skip(source))]
pub async fn get_pollen_severity(
    source: &dyn ForecastSource,
    coordinate: Coordinate,
) -> crate::Result<PollenReport> {
    let forecast = source.fetch_forecast(coordinate).await?;

    info!(status = forecast.status, "Google Pollen status");

    if !forecast.is_success() {
        return Err(GatewayError::upstream(forecast.status, &forecast.body));
    }

    let data: Value = serde_json::from_str(&forecast.body).map_err(|e| {
        debug!("Failed to parse pollen forecast: {}", e);
        GatewayError::parse(&forecast.body)
    })?;

    match grass_index(&data) {
        Some(index) => Ok(PollenReport::classified(coordinate, index, data)),
        None => {
            debug!(
                "No grass index for {}, reporting unknown",
                coordinate.format_coordinates()
            );
            Ok(PollenReport::unknown(coordinate, data))
        }
    }
}
