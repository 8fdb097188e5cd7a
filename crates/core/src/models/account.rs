use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Balance-sheet side of an account.
///
/// Only `Asset` and `Liability` take part in net worth totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Cash, savings, investments, property
    Asset,
    /// Loans, credit cards, mortgages
    Liability,
    /// Owner's equity
    Equity,
    /// Anything else found in imported data
    #[serde(other)]
    Other,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Asset => write!(f, "asset"),
            AccountType::Liability => write!(f, "liability"),
            AccountType::Equity => write!(f, "equity"),
            AccountType::Other => write!(f, "other"),
        }
    }
}

/// A tracked account. Balances and transactions refer to it by `id`.
///
/// Once referenced, only `name`, `category` and `account_type` may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: String,

    /// Display name (e.g., "Checking", "Mortgage")
    pub name: String,

    /// Free-form grouping (e.g., "Cash", "Investments")
    pub category: String,

    /// Asset / liability / equity
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            account_type,
            created_at: Utc::now(),
        }
    }
}
