use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day;
use crate::money::round_currency;

/// A user-asserted balance: "the account held exactly `amount` as of `date`".
///
/// Snapshots are append-only facts; a later snapshot supersedes an earlier
/// one instead of mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Unique identifier
    pub id: String,

    /// Owning account
    pub account_id: String,

    /// Signed amount, rounded to cents
    pub amount: f64,

    /// Point in time the amount applies to
    pub date: DateTime<Utc>,
}

impl Balance {
    /// Create a snapshot at an exact timestamp. The amount is rounded to cents.
    pub fn new(account_id: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            amount: round_currency(amount),
            date,
        }
    }

    /// Create a snapshot for a calendar day, stored at midnight UTC.
    pub fn on_day(account_id: impl Into<String>, amount: f64, day: NaiveDate) -> Self {
        Self::new(account_id, amount, day::start_of_day(day))
    }

    /// Whether the balance history engine treats this as an authoritative
    /// snapshot.
    ///
    /// Only snapshots stamped exactly at midnight UTC qualify. Anything with
    /// an intra-day time is assumed to be a derived point (for example a
    /// chart point written back as a balance) and is left out of history
    /// reconstruction.
    #[must_use]
    pub fn is_pure_snapshot(&self) -> bool {
        day::is_midnight_utc(&self.date)
    }

    /// Calendar day this snapshot belongs to.
    #[must_use]
    pub fn day_key(&self) -> NaiveDate {
        day::day_key(&self.date)
    }
}

/// One entry of a batch balance update: "account X holds `amount`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub account_id: String,
    pub amount: f64,
}

impl BalanceUpdate {
    pub fn new(account_id: impl Into<String>, amount: f64) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
        }
    }
}
