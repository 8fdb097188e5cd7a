use chrono::{DateTime, Utc};

use crate::models::account::Account;
use crate::models::analytics::{AccountSummary, NetWorthSummary};
use crate::models::balance::Balance;
use crate::models::series::NetWorthPoint;
use crate::models::transaction::Transaction;
use crate::money::round_currency;
use crate::services::chart_service::ChartService;
use crate::services::series_service::SeriesService;

/// Computes history-view analytics: per-account change over a range and
/// net worth highs/lows.
pub struct AnalyticsService {
    series_service: SeriesService,
    chart_service: ChartService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            series_service: SeriesService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// One summary per account that has chart points in the range, in
    /// `accounts` order. Accounts with no points in the range are omitted.
    pub fn account_summaries(
        &self,
        accounts: &[Account],
        balances: &[Balance],
        transactions: &[Transaction],
        range_start: Option<DateTime<Utc>>,
    ) -> Vec<AccountSummary> {
        let chart = self
            .chart_service
            .synthesize_chart_series(accounts, balances, transactions, range_start);

        accounts
            .iter()
            .filter_map(|account| {
                let amounts: Vec<f64> = chart
                    .iter()
                    .filter(|p| p.account_id == account.id)
                    .map(|p| p.amount)
                    .collect();

                let first_amount = *amounts.first()?;
                let latest_amount = *amounts.last()?;
                let (change, change_pct) = Self::change_between(first_amount, latest_amount, amounts.len());

                Some(AccountSummary {
                    account: account.clone(),
                    current_balance: self
                        .series_service
                        .current_balance(&account.id, balances, transactions),
                    first_amount,
                    latest_amount,
                    change,
                    change_pct,
                    point_count: amounts.len(),
                })
            })
            .collect()
    }

    /// Headline figures for a net worth series. `None` for an empty series.
    pub fn net_worth_summary(&self, series: &[NetWorthPoint]) -> Option<NetWorthSummary> {
        let first = series.first()?;
        let latest = series.last()?;
        let (change, change_pct) =
            Self::change_between(first.net_worth, latest.net_worth, series.len());

        let highest = series
            .iter()
            .map(|p| p.net_worth)
            .fold(f64::NEG_INFINITY, f64::max);
        let lowest = series
            .iter()
            .map(|p| p.net_worth)
            .fold(f64::INFINITY, f64::min);

        Some(NetWorthSummary {
            current_net_worth: latest.net_worth,
            current_assets: latest.assets,
            current_liabilities: latest.liabilities,
            change,
            change_pct,
            highest,
            lowest,
        })
    }

    /// Absolute and percentage change from `first` to `latest`.
    /// Both are 0 with fewer than two points; the percentage is 0 when
    /// `first` is 0.
    fn change_between(first: f64, latest: f64, point_count: usize) -> (f64, f64) {
        if point_count < 2 {
            return (0.0, 0.0);
        }
        let change = round_currency(latest - first);
        let change_pct = if first == 0.0 {
            0.0
        } else {
            round_currency((latest - first) / first.abs() * 100.0)
        };
        (change, change_pct)
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
