//! Coordinate model for the requested location

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Raw `lat`/`lng` query parameters before validation
#[derive(Debug, Default, Deserialize)]
pub struct CoordinateParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate raw query parameters.
    ///
    /// Both values must be present and parse as finite numbers. Range is not
    /// checked: the provider decides what it accepts.
    pub fn from_params(params: &CoordinateParams) -> Result<Self, GatewayError> {
        let lat = parse_component("lat", params.lat.as_deref())?;
        let lng = parse_component("lng", params.lng.as_deref())?;
        Ok(Self { lat, lng })
    }

    /// Format coordinate as a display string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

fn parse_component(name: &str, raw: Option<&str>) -> Result<f64, GatewayError> {
    let raw = raw.ok_or_else(|| GatewayError::bad_request(format!("missing {name}")))?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GatewayError::bad_request(format!(
            "{name} is not a number: {raw:?}"
        ))),
    }
}
