use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::day;
use crate::models::balance::Balance;
use crate::models::series::DailyBalancePoint;
use crate::models::transaction::Transaction;
use crate::money::{apply_delta, round_currency};

/// Reconstructs an account's balance history from sparse snapshots and a
/// log of income/expense deltas.
///
/// Pure business logic with no I/O and no stored running ledger. The same
/// inputs always yield the same points in the same order.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Build the ordered balance series for one account.
    ///
    /// For every calendar day that has a snapshot or a transaction:
    /// 1. A pure snapshot (see [`Balance::is_pure_snapshot`]) resets the
    ///    running balance and emits a point at midnight.
    /// 2. The day's transactions are applied in `(timestamp, sequence,
    ///    input position)` order, each emitting a point one second after
    ///    the previous one.
    ///
    /// Days without a snapshot carry the previous day's closing balance.
    /// The running balance starts at 0.
    pub fn build_daily_series(
        &self,
        account_id: &str,
        balances: &[Balance],
        transactions: &[Transaction],
    ) -> Vec<DailyBalancePoint> {
        let snapshots = Self::snapshots_by_day(account_id, balances);
        let mut day_transactions = Self::transactions_by_day(account_id, transactions);

        let days: BTreeSet<NaiveDate> = snapshots
            .keys()
            .chain(day_transactions.keys())
            .copied()
            .collect();

        let mut current = 0.0;
        let mut points = Vec::new();

        for day_key in days {
            if let Some(snapshot) = snapshots.get(&day_key) {
                current = round_currency(snapshot.amount);
                points.push(DailyBalancePoint {
                    day_key,
                    date: day::start_of_day(day_key),
                    amount: current,
                });
            }

            if let Some(events) = day_transactions.get_mut(&day_key) {
                events.sort_by_key(|(position, tx)| (tx.date, tx.sequence, *position));

                for (event_index, (_, tx)) in events.iter().enumerate() {
                    current = apply_delta(current, tx.signed_amount());
                    points.push(DailyBalancePoint {
                        day_key,
                        date: day::event_time(day_key, event_index),
                        amount: current,
                    });
                }
            }
        }

        points
    }

    /// Balance after the last snapshot or transaction, or 0 with no history.
    pub fn current_balance(
        &self,
        account_id: &str,
        balances: &[Balance],
        transactions: &[Transaction],
    ) -> f64 {
        self.build_daily_series(account_id, balances, transactions)
            .last()
            .map_or(0.0, |point| point.amount)
    }

    /// The authoritative snapshot of each day: the latest pure snapshot,
    /// with later input winning a timestamp tie.
    fn snapshots_by_day<'a>(
        account_id: &str,
        balances: &'a [Balance],
    ) -> BTreeMap<NaiveDate, &'a Balance> {
        let mut by_day: BTreeMap<NaiveDate, &Balance> = BTreeMap::new();

        for balance in balances.iter().filter(|b| b.account_id == account_id) {
            if !balance.is_pure_snapshot() {
                tracing::trace!(
                    balance_id = %balance.id,
                    date = %balance.date,
                    "ignoring intra-day balance in history reconstruction"
                );
                continue;
            }

            match by_day.entry(balance.day_key()) {
                Entry::Vacant(slot) => {
                    slot.insert(balance);
                }
                Entry::Occupied(mut slot) => {
                    if balance.date >= slot.get().date {
                        slot.insert(balance);
                    }
                }
            }
        }

        by_day
    }

    /// The account's transactions grouped by day, each tagged with its
    /// position in the input slice.
    fn transactions_by_day<'a>(
        account_id: &str,
        transactions: &'a [Transaction],
    ) -> BTreeMap<NaiveDate, Vec<(usize, &'a Transaction)>> {
        let mut by_day: BTreeMap<NaiveDate, Vec<(usize, &Transaction)>> = BTreeMap::new();

        for (position, tx) in transactions.iter().enumerate() {
            if tx.belongs_to(account_id) {
                by_day.entry(tx.day_key()).or_default().push((position, tx));
            }
        }

        by_day
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}
