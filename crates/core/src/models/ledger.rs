use serde::{Deserialize, Serialize};

use super::account::Account;
use super::balance::Balance;
use super::settings::Settings;
use super::transaction::Transaction;

/// The main data container: everything the user has entered.
///
/// Balance history is never stored here. It is rebuilt from `balances`
/// and `transactions` whenever it is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Tracked accounts, in creation order
    pub accounts: Vec<Account>,

    /// Balance snapshots, in insertion order
    pub balances: Vec<Balance>,

    /// Income/expense transactions, in insertion order
    pub transactions: Vec<Transaction>,

    /// User settings
    #[serde(default)]
    pub settings: Settings,

    /// Next sequence number handed to a new transaction
    #[serde(default)]
    pub next_sequence: u64,
}

impl Ledger {
    /// Look up an account by id.
    #[must_use]
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    /// Whether an account with this id exists.
    #[must_use]
    pub fn has_account(&self, account_id: &str) -> bool {
        self.account(account_id).is_some()
    }
}
