use serde::{Deserialize, Serialize};

use super::account::Account;

/// Per-account figures for the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// The account
    pub account: Account,

    /// Balance after the last known snapshot or transaction (ignores the range)
    pub current_balance: f64,

    /// First charted amount inside the range (anchor included)
    pub first_amount: f64,

    /// Last charted amount inside the range
    pub latest_amount: f64,

    /// latest_amount - first_amount, or 0 with fewer than two points
    pub change: f64,

    /// change / |first_amount| * 100, or 0 when first_amount is 0
    pub change_pct: f64,

    /// Number of chart points inside the range
    pub point_count: usize,
}

/// Net worth figures across a charted range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    /// Net worth on the last charted day
    pub current_net_worth: f64,

    /// Assets on the last charted day
    pub current_assets: f64,

    /// Liabilities on the last charted day
    pub current_liabilities: f64,

    /// Net worth change between the first and last charted day
    pub change: f64,

    /// change / |first net worth| * 100, or 0 when the first net worth is 0
    pub change_pct: f64,

    /// Highest net worth seen in the range
    pub highest: f64,

    /// Lowest net worth seen in the range
    pub lowest: f64,
}
