use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Preset chart windows offered by the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl ChartRange {
    /// Length of the window, or `None` for the full history.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            ChartRange::Week => Some(Duration::days(7)),
            ChartRange::Month => Some(Duration::days(30)),
            ChartRange::Quarter => Some(Duration::days(90)),
            ChartRange::Year => Some(Duration::days(365)),
            ChartRange::All => None,
        }
    }

    /// Start of the window ending at `now`.
    #[must_use]
    pub fn start_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|d| now - d)
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartRange::Week => write!(f, "7d"),
            ChartRange::Month => write!(f, "30d"),
            ChartRange::Quarter => write!(f, "90d"),
            ChartRange::Year => write!(f, "1y"),
            ChartRange::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for ChartRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(ChartRange::Week),
            "30d" => Ok(ChartRange::Month),
            "90d" => Ok(ChartRange::Quarter),
            "1y" => Ok(ChartRange::Year),
            "all" => Ok(ChartRange::All),
            other => Err(CoreError::ValidationError(format!(
                "Unknown chart range '{other}': expected one of 7d, 30d, 90d, 1y, all"
            ))),
        }
    }
}

/// User-configurable settings, stored alongside the ledger data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency code shown next to amounts (e.g., "USD"). Display only;
    /// amounts are never converted.
    pub default_currency: String,

    /// Chart window selected when the history view opens.
    #[serde(default)]
    pub default_range: ChartRange,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            default_range: ChartRange::default(),
        }
    }
}
