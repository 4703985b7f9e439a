use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use super::{ForecastSource, RawForecast};
use crate::config::PollenApiConfig;
use crate::models::Coordinate;

/// Only today's forecast is read
const FORECAST_DAYS: &str = "1";
const LANGUAGE_CODE: &str = "en";

/// Google Pollen API client
#[derive(Debug, Clone)]
pub struct GooglePollenClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePollenClient {
    /// Create a new client. No timeout is set; transport defaults apply.
    pub fn new(config: &PollenApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hayfever/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `forecast:lookup` URL for a coordinate
    pub fn lookup_url(&self, coordinate: Coordinate) -> Result<Url> {
        let endpoint = format!("{}/forecast:lookup", self.base_url);
        Url::parse_with_params(
            &endpoint,
            [
                ("key", self.api_key.clone().unwrap_or_default()),
                ("languageCode", LANGUAGE_CODE.to_string()),
                ("days", FORECAST_DAYS.to_string()),
                ("location.latitude", coordinate.lat.to_string()),
                ("location.longitude", coordinate.lng.to_string()),
            ],
        )
        .with_context(|| format!("Invalid pollen API endpoint: {endpoint}"))
    }
}

#[async_trait]
impl ForecastSource for GooglePollenClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<RawForecast> {
        let url = self.lookup_url(coordinate)?;
        debug!(
            "Requesting pollen forecast for {}",
            coordinate.format_coordinates()
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| "Pollen API request failed")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| "Failed to read Pollen API response body")?;

        Ok(RawForecast { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>, base_url: &str) -> GooglePollenClient {
        GooglePollenClient::new(&PollenApiConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_lookup_url_parameters() {
        let client = client(Some("secret"), "https://pollen.googleapis.com/v1");
        let url = client.lookup_url(Coordinate::new(-31.95, 115.86)).unwrap();

        assert_eq!(url.path(), "/v1/forecast:lookup");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("key".to_string(), "secret".to_string())));
        assert!(pairs.contains(&("languageCode".to_string(), "en".to_string())));
        assert!(pairs.contains(&("days".to_string(), "1".to_string())));
        assert!(pairs.contains(&("location.latitude".to_string(), "-31.95".to_string())));
        assert!(pairs.contains(&("location.longitude".to_string(), "115.86".to_string())));
    }

    #[test]
    fn test_lookup_url_without_key() {
        let client = client(None, "https://pollen.googleapis.com/v1/");
        let url = client.lookup_url(Coordinate::new(0.0, 0.0)).unwrap();

        assert_eq!(url.path(), "/v1/forecast:lookup");
        let key = url.query_pairs().find(|(name, _)| name == "key").map(|(_, v)| v.into_owned());
        assert_eq!(key.as_deref(), Some(""));
    }
}
