//! Threat analysis models

use serde::{Deserialize, Serialize};

/// Discrete threat status shown next to an analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLevel {
    Processing,
    Analyzing,
    Warning,
    Critical,
    Melting,
    Stable,
    Tracking,
    Dangerous,
    Eruption,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Processing => "PROCESSING",
            StatusLevel::Analyzing => "ANALYZING",
            StatusLevel::Warning => "WARNING",
            StatusLevel::Critical => "CRITICAL",
            StatusLevel::Melting => "MELTING",
            StatusLevel::Stable => "STABLE",
            StatusLevel::Tracking => "TRACKING",
            StatusLevel::Dangerous => "DANGEROUS",
            StatusLevel::Eruption => "ERUPTION",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled, unit-tagged value; `value` is already formatted for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub unit: String,
}

impl Stat {
    pub fn new(label: &str, value: String, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// Classification result for one event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub status: StatusLevel,
    pub stats: Vec<Stat>,
}

impl Analysis {
    /// Placeholder shown while the weather fetch is still in flight
    pub fn pending() -> Self {
        Self {
            summary: "Analyzing data stream...".to_string(),
            status: StatusLevel::Processing,
            stats: Vec::new(),
        }
    }
}
