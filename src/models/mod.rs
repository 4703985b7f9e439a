//! Data models for the Hayfever gateway
//!
//! This module contains the request-scoped domain models organized by concern:
//! - Coordinate: Validated latitude/longitude pair from the query string
//! - Severity: Severity bands and the index classification ladder
//! - Report: The outward-facing pollen severity payload

pub mod coordinate;
pub mod report;
pub mod severity;

// Re-export all public types for convenient access
pub use coordinate::{Coordinate, CoordinateParams};
pub use report::PollenReport;
pub use severity::SeverityLevel;
