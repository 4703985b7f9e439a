//! `Hayfever` - grass pollen severity gateway
//!
//! This library proxies a coordinate to the Google Pollen API, pulls today's
//! grass pollen index out of the forecast and classifies it into a severity
//! band with a label and display colour for the client UI.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pollen;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::HayfeverConfig;
pub use error::GatewayError;
pub use models::{Coordinate, PollenReport, SeverityLevel};
pub use pollen::{ForecastSource, GooglePollenClient, RawForecast, get_pollen_severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GatewayError>;
