//! Severity bands for the grass pollen index

use serde::Serialize;

/// Severity band reported to the client UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// Index 1 or below
    Low,
    /// Index exactly 2 or 3
    Moderate,
    /// Index exactly 4
    High,
    /// Index 5 and anything the other bands do not match
    Extreme,
    /// Provider had no grass index for the location
    Unknown,
}

impl SeverityLevel {
    /// Classify a provider index value.
    ///
    /// This is an equality ladder, not a scale: only `<= 1`, `2`, `3` and `4`
    /// are matched explicitly, so fractional values such as 1.5 or 4.5 and
    /// any NaN land in `Extreme`.
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value <= 1.0 {
            SeverityLevel::Low
        } else if value == 2.0 || value == 3.0 {
            SeverityLevel::Moderate
        } else if value == 4.0 {
            SeverityLevel::High
        } else {
            SeverityLevel::Extreme
        }
    }

    /// Identifier used in the JSON payload
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Extreme => "extreme",
            SeverityLevel::Unknown => "unknown",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low pollen",
            SeverityLevel::Moderate => "Moderate pollen",
            SeverityLevel::High => "High pollen",
            SeverityLevel::Extreme => "Extreme pollen",
            SeverityLevel::Unknown => "Pollen level unknown",
        }
    }

    /// Hex display colour
    #[must_use]
    pub fn colour(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "#22c55e",
            SeverityLevel::Moderate => "#eab308",
            SeverityLevel::High => "#f97316",
            SeverityLevel::Extreme => "#ef4444",
            SeverityLevel::Unknown => "#64748b",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
