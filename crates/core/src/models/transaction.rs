use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in, increases the running balance
    Income,
    /// Money out, decreases the running balance
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A dated income/expense event.
///
/// Unlike a [`Balance`](super::balance::Balance), a transaction is a delta
/// applied on top of whatever the running balance is at its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: String,

    /// Owning account, if the transaction is linked to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Unsigned magnitude, rounded to cents
    pub amount: f64,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Free-text category (e.g., "Groceries", "Salary")
    #[serde(default)]
    pub category: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Creation order. Breaks ties between transactions sharing a timestamp.
    #[serde(default)]
    pub sequence: u64,
}

impl Transaction {
    /// Amount with its sign applied: `+amount` for income, `-amount` for expense.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Calendar day this transaction belongs to.
    #[must_use]
    pub fn day_key(&self) -> NaiveDate {
        day::day_key(&self.date)
    }

    /// Whether this transaction is linked to `account_id`.
    #[must_use]
    pub fn belongs_to(&self, account_id: &str) -> bool {
        self.account_id.as_deref() == Some(account_id)
    }
}

/// Input for creating a transaction. The ledger assigns `id` and `sequence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(default)]
    pub account_id: Option<String>,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        account_id: Option<String>,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id,
            amount,
            date,
            description: String::new(),
            category: String::new(),
            kind,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub(crate) fn into_transaction(self, sequence: u64) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            account_id: self.account_id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            category: self.category,
            kind: self.kind,
            sequence,
        }
    }
}

/// Partial update of a transaction. `None` fields are left unchanged.
///
/// `account_id: Some(None)` unlinks the transaction from its account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub account_id: Option<Option<String>>,
    pub amount: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
}
