//! Pollen severity payload returned to the client UI

use serde::Serialize;
use serde_json::{Number, Value};

use super::{Coordinate, SeverityLevel};
use crate::pollen::extract::IndexInfo;

/// Normalized response for one coordinate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollenReport {
    pub lat: f64,
    pub lng: f64,
    /// `low` | `moderate` | `high` | `extreme` | `unknown`
    pub level: SeverityLevel,
    pub label: &'static str,
    /// Hex colour for the UI
    pub colour: &'static str,
    /// Provider index value, echoed without conversion
    pub index_value: Option<Number>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Full grass index object as sent by the provider
    pub grass_index: Option<Value>,
    /// Full provider response
    pub raw: Value,
}

impl PollenReport {
    /// Report for a forecast that carried a grass index
    #[must_use]
    pub fn classified(coordinate: Coordinate, index: IndexInfo, raw: Value) -> Self {
        let level = SeverityLevel::classify(index.numeric_value());
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
            level,
            label: level.label(),
            colour: level.colour(),
            index_value: Some(index.value),
            category: index.category,
            description: Some(index.description),
            grass_index: Some(index.raw),
            raw,
        }
    }

    /// Report for a forecast without grass data
    #[must_use]
    pub fn unknown(coordinate: Coordinate, raw: Value) -> Self {
        let level = SeverityLevel::Unknown;
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
            level,
            label: level.label(),
            colour: level.colour(),
            index_value: None,
            category: None,
            description: None,
            grass_index: None,
            raw,
        }
    }
}
