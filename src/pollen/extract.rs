//! Grass index extraction from the provider's forecast body
//!
//! The provider nests the index several levels deep. Each link is checked in
//! turn and any missing one yields `None`, which the gateway reports as the
//! `unknown` band rather than an error.

use serde_json::{Number, Value};

/// Pollen type code for grass
pub const GRASS_CODE: &str = "GRASS";

/// Index details for one pollen type
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    /// Index score, nominally 0..=5
    pub value: Number,
    /// Provider category such as "Low" or "Moderate"
    pub category: Option<String>,
    /// Provider description, empty when absent
    pub description: String,
    /// The index object exactly as received
    pub raw: Value,
}

impl IndexInfo {
    /// Read an `indexInfo` object. Returns `None` unless it is an object with a numeric `value`.
    #[must_use]
    pub fn from_value(index: &Value) -> Option<Self> {
        let fields = index.as_object()?;
        let Some(Value::Number(value)) = fields.get("value") else {
            return None;
        };

        Some(Self {
            value: value.clone(),
            category: fields
                .get("category")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: fields
                .get("indexDescription")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            raw: index.clone(),
        })
    }

    /// Index value as a float for classification
    #[must_use]
    pub fn numeric_value(&self) -> f64 {
        self.value.as_f64().unwrap_or(f64::NAN)
    }
}

/// Today's grass index: first `dailyInfo` entry, `pollenTypeInfo` entry coded `GRASS`.
#[must_use]
pub fn grass_index(forecast: &Value) -> Option<IndexInfo> {
    let today = forecast.get("dailyInfo")?.as_array()?.first()?;
    let grass = today
        .get("pollenTypeInfo")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("code").and_then(Value::as_str) == Some(GRASS_CODE))?;
    IndexInfo::from_value(grass.get("indexInfo")?)
}
