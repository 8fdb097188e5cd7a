use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One reconstructed balance for an account.
///
/// Never persisted. Recomputed from snapshots and transactions on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBalancePoint {
    /// Calendar day (UTC) the point belongs to
    pub day_key: NaiveDate,

    /// Midnight for a snapshot, midnight + N seconds for the N-th transaction
    pub date: DateTime<Utc>,

    /// Running balance after this point, rounded to cents
    pub amount: f64,
}

/// A flat, account-tagged point for time-series charts.
///
/// The core produces these; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// `"{account_id}:{YYYY-MM-DD}"`, used as a list key downstream
    pub id: String,

    /// Account this point belongs to
    pub account_id: String,

    /// Balance at `date`
    pub amount: f64,

    /// Point in time on the chart's x axis
    pub date: DateTime<Utc>,
}

impl ChartPoint {
    /// Build the composite list key for an account and day.
    #[must_use]
    pub fn composite_id(account_id: &str, day: NaiveDate) -> String {
        format!("{account_id}:{day}")
    }
}

/// Balance-sheet totals for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthPoint {
    /// Calendar day (UTC)
    pub day_key: NaiveDate,

    /// Midnight UTC of `day_key`
    pub date: DateTime<Utc>,

    /// Sum of asset account balances
    pub assets: f64,

    /// Sum of liability account balances as a positive magnitude
    pub liabilities: f64,

    /// assets - liabilities
    pub net_worth: f64,
}
