use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::account::{Account, AccountType};
use crate::models::balance::{Balance, BalanceUpdate};
use crate::models::ledger::Ledger;
use crate::models::transaction::{NewTransaction, Transaction, TransactionUpdate};
use crate::money::round_currency;

/// Manages accounts, balance snapshots and transactions in a [`Ledger`].
///
/// Enforces referential integrity (every balance and linked transaction
/// points at an existing account) so the history engine can assume it.
/// Does not check whether a transaction makes sense for the account type.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Add a new account.
    pub fn add_account(&self, ledger: &mut Ledger, account: Account) -> Result<(), CoreError> {
        Self::validate_name(&account.name)?;
        if ledger.has_account(&account.id) {
            return Err(CoreError::ValidationError(format!(
                "Account id {} already exists",
                account.id
            )));
        }
        tracing::debug!(account_id = %account.id, name = %account.name, "adding account");
        ledger.accounts.push(account);
        Ok(())
    }

    /// Rename / recategorize / retype an account. Its id and creation
    /// time never change.
    pub fn update_account(
        &self,
        ledger: &mut Ledger,
        account_id: &str,
        name: String,
        category: String,
        account_type: AccountType,
    ) -> Result<(), CoreError> {
        Self::validate_name(&name)?;
        let account = ledger
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        account.name = name;
        account.category = category;
        account.account_type = account_type;
        tracing::debug!(account_id, "updated account");
        Ok(())
    }

    /// Remove an account together with its balance snapshots.
    /// Its transactions are kept but unlinked.
    pub fn delete_account(&self, ledger: &mut Ledger, account_id: &str) -> Result<Account, CoreError> {
        let idx = ledger
            .accounts
            .iter()
            .position(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        let removed = ledger.accounts.remove(idx);
        let before = ledger.balances.len();
        ledger.balances.retain(|b| b.account_id != account_id);
        let removed_balances = before - ledger.balances.len();

        let mut unlinked = 0usize;
        for tx in ledger.transactions.iter_mut().filter(|t| t.belongs_to(account_id)) {
            tx.account_id = None;
            unlinked += 1;
        }

        tracing::debug!(
            account_id,
            removed_balances,
            unlinked_transactions = unlinked,
            "deleted account"
        );
        Ok(removed)
    }

    // ── Balances ────────────────────────────────────────────────────

    /// Store a snapshot for `day` (midnight UTC). Returns its id.
    pub fn record_balance(
        &self,
        ledger: &mut Ledger,
        account_id: &str,
        amount: f64,
        day: NaiveDate,
    ) -> Result<String, CoreError> {
        self.validate_balance(ledger, account_id, amount)?;
        let balance = Balance::on_day(account_id, amount, day);
        let id = balance.id.clone();
        tracing::debug!(account_id, %day, amount = balance.amount, "recording balance");
        ledger.balances.push(balance);
        Ok(id)
    }

    /// Store several snapshots for the same `day`. All updates are validated
    /// first; if any fails, nothing is stored.
    ///
    /// With `replace_existing`, snapshots already recorded on `day` for the
    /// updated accounts are removed first.
    pub fn record_balances(
        &self,
        ledger: &mut Ledger,
        updates: &[BalanceUpdate],
        day: NaiveDate,
        replace_existing: bool,
    ) -> Result<Vec<String>, CoreError> {
        for update in updates {
            self.validate_balance(ledger, &update.account_id, update.amount)?;
        }

        if replace_existing {
            ledger.balances.retain(|b| {
                b.day_key() != day || !updates.iter().any(|u| u.account_id == b.account_id)
            });
        }

        let new_balances: Vec<Balance> = updates
            .iter()
            .map(|u| Balance::on_day(u.account_id.as_str(), u.amount, day))
            .collect();
        let ids = new_balances.iter().map(|b| b.id.clone()).collect();

        tracing::debug!(%day, count = new_balances.len(), replace_existing, "recording balances");
        ledger.balances.extend(new_balances);
        Ok(ids)
    }

    /// Remove a single snapshot by id.
    pub fn delete_balance(&self, ledger: &mut Ledger, balance_id: &str) -> Result<Balance, CoreError> {
        let idx = ledger
            .balances
            .iter()
            .position(|b| b.id == balance_id)
            .ok_or_else(|| CoreError::BalanceNotFound(balance_id.to_string()))?;
        Ok(ledger.balances.remove(idx))
    }

    /// Snapshots of one account, newest first.
    pub fn balances_for<'a>(&self, ledger: &'a Ledger, account_id: &str) -> Vec<&'a Balance> {
        let mut balances: Vec<&Balance> = ledger
            .balances
            .iter()
            .filter(|b| b.account_id == account_id)
            .collect();
        balances.sort_by(|a, b| b.date.cmp(&a.date));
        balances
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Add a transaction, assigning it the next sequence number.
    /// Returns its id.
    pub fn add_transaction(
        &self,
        ledger: &mut Ledger,
        new: NewTransaction,
    ) -> Result<String, CoreError> {
        self.validate_transaction(ledger, new.account_id.as_deref(), new.amount)?;

        let sequence = ledger.next_sequence;
        ledger.next_sequence += 1;

        let mut tx = new.into_transaction(sequence);
        tx.amount = round_currency(tx.amount);
        let id = tx.id.clone();

        tracing::debug!(
            transaction_id = %id,
            account_id = ?tx.account_id,
            kind = %tx.kind,
            amount = tx.amount,
            sequence,
            "adding transaction"
        );
        ledger.transactions.push(tx);
        Ok(id)
    }

    /// Apply a partial update. Validates the result before committing.
    /// The transaction keeps its id and sequence number.
    pub fn update_transaction(
        &self,
        ledger: &mut Ledger,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<(), CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;

        let mut updated = ledger.transactions[idx].clone();
        if let Some(account_id) = update.account_id {
            updated.account_id = account_id;
        }
        if let Some(amount) = update.amount {
            updated.amount = amount;
        }
        if let Some(date) = update.date {
            updated.date = date;
        }
        if let Some(description) = update.description {
            updated.description = description;
        }
        if let Some(category) = update.category {
            updated.category = category;
        }
        if let Some(kind) = update.kind {
            updated.kind = kind;
        }

        self.validate_transaction(ledger, updated.account_id.as_deref(), updated.amount)?;
        updated.amount = round_currency(updated.amount);

        tracing::debug!(transaction_id, "updated transaction");
        ledger.transactions[idx] = updated;
        Ok(())
    }

    /// Remove a transaction by id and return it.
    pub fn delete_transaction(
        &self,
        ledger: &mut Ledger,
        transaction_id: &str,
    ) -> Result<Transaction, CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        tracing::debug!(transaction_id, "deleting transaction");
        Ok(ledger.transactions.remove(idx))
    }

    /// Transactions of one account, newest first. Same-timestamp entries
    /// are ordered newest sequence first.
    pub fn transactions_for<'a>(&self, ledger: &'a Ledger, account_id: &str) -> Vec<&'a Transaction> {
        let mut transactions: Vec<&Transaction> = ledger
            .transactions
            .iter()
            .filter(|t| t.belongs_to(account_id))
            .collect();
        transactions.sort_by(|a, b| (b.date, b.sequence).cmp(&(a.date, a.sequence)));
        transactions
    }

    // ── Validation ──────────────────────────────────────────────────

    fn validate_name(name: &str) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Account name must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn validate_balance(&self, ledger: &Ledger, account_id: &str, amount: f64) -> Result<(), CoreError> {
        if !ledger.has_account(account_id) {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Balance amount must be a finite number, got {amount}"
            )));
        }
        Ok(())
    }

    /// Rules:
    /// - Amount is an unsigned, finite magnitude (the kind carries the sign)
    /// - A linked account must exist
    fn validate_transaction(
        &self,
        ledger: &Ledger,
        account_id: Option<&str>,
        amount: f64,
    ) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be a non-negative finite number, got {amount}"
            )));
        }
        if let Some(account_id) = account_id {
            if !ledger.has_account(account_id) {
                return Err(CoreError::AccountNotFound(account_id.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
