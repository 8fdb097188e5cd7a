pub mod day;
pub mod errors;
pub mod models;
pub mod money;
pub mod services;
pub mod storage;

use chrono::{DateTime, NaiveDate, Utc};
use models::{
    account::{Account, AccountType},
    analytics::{AccountSummary, NetWorthSummary},
    balance::{Balance, BalanceUpdate},
    ledger::Ledger,
    series::{ChartPoint, DailyBalancePoint, NetWorthPoint},
    settings::{ChartRange, Settings},
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};
use services::{
    analytics_service::AnalyticsService, chart_service::ChartService,
    ledger_service::LedgerService, series_service::SeriesService,
};
use storage::{format::ImportReport, manager::StorageManager};

use errors::CoreError;

/// Main entry point for the Net Worth Tracker core library.
/// Holds the ledger (accounts, snapshots, transactions, settings) and all
/// services needed to operate on it.
#[must_use]
pub struct NetWorthTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    series_service: SeriesService,
    chart_service: ChartService,
    analytics_service: AnalyticsService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for NetWorthTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetWorthTracker")
            .field("accounts", &self.ledger.accounts.len())
            .field("balances", &self.ledger.balances.len())
            .field("transactions", &self.ledger.transactions.len())
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl NetWorthTracker {
    /// Create a brand new empty tracker with default settings.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Wrap an existing ledger (e.g., one loaded by the host application).
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self::build(ledger)
    }

    /// Borrow the underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Load a tracker from a file written by [`Self::save_to_file`] (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_file(path)?;
        Ok(Self::build(ledger))
    }

    /// Save the ledger to a file (native only).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Create an account. Returns its id.
    pub fn add_account(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        account_type: AccountType,
    ) -> Result<String, CoreError> {
        let account = Account::new(name, category, account_type);
        let id = account.id.clone();
        self.ledger_service.add_account(&mut self.ledger, account)?;
        self.dirty = true;
        Ok(id)
    }

    /// Change an account's name, category and type.
    pub fn update_account(
        &mut self,
        account_id: &str,
        name: impl Into<String>,
        category: impl Into<String>,
        account_type: AccountType,
    ) -> Result<(), CoreError> {
        self.ledger_service.update_account(
            &mut self.ledger,
            account_id,
            name.into(),
            category.into(),
            account_type,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Delete an account and its snapshots; its transactions become unlinked.
    pub fn delete_account(&mut self, account_id: &str) -> Result<Account, CoreError> {
        let removed = self
            .ledger_service
            .delete_account(&mut self.ledger, account_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Get a single account by its id.
    #[must_use]
    pub fn get_account(&self, account_id: &str) -> Option<&Account> {
        self.ledger.account(account_id)
    }

    /// All accounts, in creation order.
    #[must_use]
    pub fn get_accounts(&self) -> &[Account] {
        &self.ledger.accounts
    }

    // ── Balances ────────────────────────────────────────────────────

    /// Record that an account held `amount` on `day`. Returns the snapshot id.
    pub fn record_balance(
        &mut self,
        account_id: &str,
        amount: f64,
        day: NaiveDate,
    ) -> Result<String, CoreError> {
        let id = self
            .ledger_service
            .record_balance(&mut self.ledger, account_id, amount, day)?;
        self.dirty = true;
        Ok(id)
    }

    /// Record balances for several accounts on the same day (all-or-nothing).
    /// With `replace_existing`, earlier snapshots of that day for the same
    /// accounts are dropped.
    pub fn record_balances(
        &mut self,
        updates: &[BalanceUpdate],
        day: NaiveDate,
        replace_existing: bool,
    ) -> Result<Vec<String>, CoreError> {
        let ids = self.ledger_service.record_balances(
            &mut self.ledger,
            updates,
            day,
            replace_existing,
        )?;
        self.dirty = true;
        Ok(ids)
    }

    /// Delete a single snapshot.
    pub fn delete_balance(&mut self, balance_id: &str) -> Result<Balance, CoreError> {
        let removed = self
            .ledger_service
            .delete_balance(&mut self.ledger, balance_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Snapshots of one account, newest first.
    #[must_use]
    pub fn get_balances_for_account(&self, account_id: &str) -> Vec<&Balance> {
        self.ledger_service.balances_for(&self.ledger, account_id)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Add an income/expense transaction. Returns its id.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<String, CoreError> {
        let id = self.ledger_service.add_transaction(&mut self.ledger, new)?;
        self.dirty = true;
        Ok(id)
    }

    /// Update fields of an existing transaction.
    pub fn update_transaction(
        &mut self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .update_transaction(&mut self.ledger, transaction_id, update)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a transaction and return it.
    pub fn delete_transaction(&mut self, transaction_id: &str) -> Result<Transaction, CoreError> {
        let removed = self
            .ledger_service
            .delete_transaction(&mut self.ledger, transaction_id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Get a single transaction by its id.
    #[must_use]
    pub fn get_transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == transaction_id)
    }

    /// All transactions, in insertion order.
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Transactions of one account, newest first.
    #[must_use]
    pub fn get_transactions_for_account(&self, account_id: &str) -> Vec<&Transaction> {
        self.ledger_service.transactions_for(&self.ledger, account_id)
    }

    // ── Balance History ─────────────────────────────────────────────

    /// Reconstructed balance history of one account.
    #[must_use]
    pub fn daily_series(&self, account_id: &str) -> Vec<DailyBalancePoint> {
        self.series_service.build_daily_series(
            account_id,
            &self.ledger.balances,
            &self.ledger.transactions,
        )
    }

    /// Current balance of one account (0 with no history).
    #[must_use]
    pub fn current_balance(&self, account_id: &str) -> f64 {
        self.series_service.current_balance(
            account_id,
            &self.ledger.balances,
            &self.ledger.transactions,
        )
    }

    /// Every account paired with its current balance, in creation order.
    #[must_use]
    pub fn get_accounts_with_balances(&self) -> Vec<(&Account, f64)> {
        self.ledger
            .accounts
            .iter()
            .map(|a| (a, self.current_balance(&a.id)))
            .collect()
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Chart points for a preset range ending now.
    #[must_use]
    pub fn chart_series(&self, range: ChartRange) -> Vec<ChartPoint> {
        self.chart_series_from(range.start_from(Utc::now()))
    }

    /// Chart points from `range_start` onwards (`None` for full history).
    #[must_use]
    pub fn chart_series_from(&self, range_start: Option<DateTime<Utc>>) -> Vec<ChartPoint> {
        self.chart_service.synthesize_chart_series(
            &self.ledger.accounts,
            &self.ledger.balances,
            &self.ledger.transactions,
            range_start,
        )
    }

    /// Daily net worth for a preset range ending now.
    #[must_use]
    pub fn net_worth_series(&self, range: ChartRange) -> Vec<NetWorthPoint> {
        self.net_worth_series_from(range.start_from(Utc::now()))
    }

    /// Daily net worth from `range_start` onwards (`None` for full history).
    #[must_use]
    pub fn net_worth_series_from(&self, range_start: Option<DateTime<Utc>>) -> Vec<NetWorthPoint> {
        self.chart_service.net_worth_series(
            &self.ledger.accounts,
            &self.ledger.balances,
            &self.ledger.transactions,
            range_start,
        )
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Per-account change figures from `range_start` onwards.
    #[must_use]
    pub fn account_summaries_from(&self, range_start: Option<DateTime<Utc>>) -> Vec<AccountSummary> {
        self.analytics_service.account_summaries(
            &self.ledger.accounts,
            &self.ledger.balances,
            &self.ledger.transactions,
            range_start,
        )
    }

    /// Net worth headline figures from `range_start` onwards.
    /// `None` when there is no history in the range.
    #[must_use]
    pub fn net_worth_summary_from(&self, range_start: Option<DateTime<Utc>>) -> Option<NetWorthSummary> {
        let series = self.net_worth_series_from(range_start);
        self.analytics_service.net_worth_summary(&series)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency (e.g., "PLN", "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string. Amounts are
    /// never converted.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
            )));
        }
        self.ledger.settings.default_currency = trimmed;
        self.dirty = true;
        Ok(())
    }

    /// Set the chart range selected by default.
    pub fn set_default_range(&mut self, range: ChartRange) {
        if self.ledger.settings.default_range != range {
            self.ledger.settings.default_range = range;
            self.dirty = true;
        }
    }

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Remove all accounts, balances and transactions. Settings are kept.
    pub fn clear_all_data(&mut self) {
        self.ledger.accounts.clear();
        self.ledger.balances.clear();
        self.ledger.transactions.clear();
        self.ledger.next_sequence = 0;
        self.dirty = true;
        tracing::debug!("cleared all ledger data");
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export accounts, balances and transactions as a JSON envelope.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        StorageManager::export_to_json(&self.ledger)
    }

    /// Replace the ledger contents with an exported envelope.
    /// Settings are kept. On error nothing changes.
    pub fn import_from_json(&mut self, json: &str) -> Result<ImportReport, CoreError> {
        let (ledger, report) = StorageManager::import_from_json(&self.ledger, json)
            .inspect_err(|e| tracing::warn!(error = %e, "import rejected"))?;
        self.ledger = ledger;
        self.dirty = true;
        tracing::debug!(
            accounts = report.accounts,
            balances = report.balances,
            transactions = report.transactions,
            skipped_transactions = report.skipped_transactions,
            "imported ledger"
        );
        Ok(report)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            series_service: SeriesService::new(),
            chart_service: ChartService::new(),
            analytics_service: AnalyticsService::new(),
            dirty: false,
        }
    }
}
