use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::balance::Balance;
use crate::models::transaction::Transaction;
use crate::money::round_currency;

/// Version written into every export.
pub const CURRENT_VERSION: &str = "1.0";

/// Export envelope as written to disk.
///
/// Layout:
/// ```text
/// {
///   "version": "1.0",
///   "exportDate": "2025-01-15T10:00:00Z",
///   "accounts": [...],
///   "balances": [...],
///   "transactions": [...]
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<'a> {
    pub version: &'a str,
    pub export_date: DateTime<Utc>,
    pub accounts: &'a [Account],
    pub balances: &'a [Balance],
    pub transactions: &'a [Transaction],
}

/// Loosely-typed envelope used for import, so that each record can be
/// validated on its own. Older exports used the `*ExportData` keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default, alias = "accountsExportData")]
    accounts: Option<Vec<Value>>,
    #[serde(default, alias = "balancesExportData")]
    balances: Option<Vec<Value>>,
    #[serde(default, alias = "transactionsExportData")]
    transactions: Option<Value>,
}

/// Validated contents of an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedData {
    pub accounts: Vec<Account>,
    pub balances: Vec<Balance>,
    pub transactions: Vec<Transaction>,
    /// Transaction records that were dropped because they failed validation
    pub skipped_transactions: usize,
}

/// Record counts of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub accounts: usize,
    pub balances: usize,
    pub transactions: usize,
    pub skipped_transactions: usize,
}

impl From<&ImportedData> for ImportReport {
    fn from(data: &ImportedData) -> Self {
        Self {
            accounts: data.accounts.len(),
            balances: data.balances.len(),
            transactions: data.transactions.len(),
            skipped_transactions: data.skipped_transactions,
        }
    }
}

/// Serialize ledger collections into a pretty-printed export envelope.
pub fn write_export(
    accounts: &[Account],
    balances: &[Balance],
    transactions: &[Transaction],
    export_date: DateTime<Utc>,
) -> Result<String, CoreError> {
    let envelope = ExportEnvelope {
        version: CURRENT_VERSION,
        export_date,
        accounts,
        balances,
        transactions,
    };
    serde_json::to_string_pretty(&envelope)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize export: {e}")))
}

/// Parse and validate an export envelope.
///
/// Rules:
/// - `version` may be a string or a number; only major version 1 is read
/// - `accounts` and `balances` arrays are required; any invalid account or
///   balance, or a repeated account or balance id, rejects the whole import
/// - every balance must belong to an imported account
/// - `transactions` is optional; invalid transaction records (ones linked
///   to an unknown account, or repeating an earlier id) are dropped one
///   by one
/// - amounts are rounded to cents
pub fn read_export(json: &str) -> Result<ImportedData, CoreError> {
    let raw: RawEnvelope = serde_json::from_str(json)?;

    if let Some(version) = raw.version {
        check_version(&version)?;
    }

    let (Some(raw_accounts), Some(raw_balances)) = (raw.accounts, raw.balances) else {
        return Err(CoreError::InvalidFileFormat(
            "Missing accounts or balances arrays".into(),
        ));
    };

    let accounts = raw_accounts
        .into_iter()
        .enumerate()
        .map(|(idx, value)| parse_account(idx, value))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(id) = first_repeated(accounts.iter().map(|a| a.id.as_str())) {
        return Err(CoreError::InvalidFileFormat(format!(
            "Duplicate account id {id}"
        )));
    }

    let balances = raw_balances
        .into_iter()
        .enumerate()
        .map(|(idx, value)| parse_balance(idx, value, &accounts))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(id) = first_repeated(balances.iter().map(|b| b.id.as_str())) {
        return Err(CoreError::InvalidFileFormat(format!(
            "Duplicate balance id {id}"
        )));
    }

    let mut transactions = Vec::new();
    let mut skipped_transactions = 0;
    if let Some(Value::Array(raw_transactions)) = raw.transactions {
        let mut seen_ids = HashSet::new();
        for (idx, value) in raw_transactions.into_iter().enumerate() {
            let parsed = parse_transaction(value, &accounts).and_then(|tx| {
                if seen_ids.insert(tx.id.clone()) {
                    Ok(tx)
                } else {
                    Err(format!("duplicate id {}", tx.id))
                }
            });
            match parsed {
                Ok(tx) => transactions.push(tx),
                Err(reason) => {
                    tracing::warn!(index = idx, %reason, "dropping invalid transaction from import");
                    skipped_transactions += 1;
                }
            }
        }
    }

    Ok(ImportedData {
        accounts,
        balances,
        transactions,
        skipped_transactions,
    })
}

/// Accepts `"1"`, `"1.x"`, `1` and `1.x`.
fn check_version(version: &Value) -> Result<(), CoreError> {
    let version = match version {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(CoreError::InvalidFileFormat(format!(
                "Invalid version field: {other}"
            )))
        }
    };
    if version != "1" && !version.starts_with("1.") {
        return Err(CoreError::UnsupportedVersion(version));
    }
    Ok(())
}

/// First id that occurs more than once, if any.
fn first_repeated<'a>(mut ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}

fn parse_account(idx: usize, value: Value) -> Result<Account, CoreError> {
    let account: Account = serde_json::from_value(value).map_err(|e| {
        CoreError::InvalidFileFormat(format!("Invalid account structure at index {idx}: {e}"))
    })?;
    if account.id.is_empty() || account.name.is_empty() || account.category.is_empty() {
        return Err(CoreError::InvalidFileFormat(format!(
            "Invalid account structure at index {idx}: id, name and category are required"
        )));
    }
    Ok(account)
}

fn parse_balance(idx: usize, value: Value, accounts: &[Account]) -> Result<Balance, CoreError> {
    let mut balance: Balance = serde_json::from_value(value).map_err(|e| {
        CoreError::InvalidFileFormat(format!("Invalid balance structure at index {idx}: {e}"))
    })?;
    if balance.id.is_empty() || balance.account_id.is_empty() || !balance.amount.is_finite() {
        return Err(CoreError::InvalidFileFormat(format!(
            "Invalid balance structure at index {idx}: id, accountId and a finite amount are required"
        )));
    }
    if !accounts.iter().any(|a| a.id == balance.account_id) {
        return Err(CoreError::InvalidFileFormat(format!(
            "Balance at index {idx} refers to unknown account {}",
            balance.account_id
        )));
    }
    balance.amount = round_currency(balance.amount);
    Ok(balance)
}

fn parse_transaction(value: Value, accounts: &[Account]) -> Result<Transaction, String> {
    let mut tx: Transaction = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if tx.id.is_empty() {
        return Err("missing id".into());
    }
    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(format!("invalid amount {}", tx.amount));
    }
    if let Some(account_id) = tx.account_id.as_deref() {
        if !accounts.iter().any(|a| a.id == account_id) {
            return Err(format!("unknown account {account_id}"));
        }
    }
    tx.amount = round_currency(tx.amount);
    Ok(tx)
}
