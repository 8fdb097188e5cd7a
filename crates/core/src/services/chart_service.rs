use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use crate::day;
use crate::models::account::{Account, AccountType};
use crate::models::balance::Balance;
use crate::models::series::{ChartPoint, DailyBalancePoint, NetWorthPoint};
use crate::models::transaction::Transaction;
use crate::money::round_currency;
use crate::services::series_service::SeriesService;

/// Generates chart-ready data sets from the reconstructed balance history.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - Per-account balance points, optionally clipped to a range
/// - Daily assets / liabilities / net worth totals
pub struct ChartService {
    series_service: SeriesService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            series_service: SeriesService::new(),
        }
    }

    /// Flat list of balance points for every account with history.
    ///
    /// Output is grouped per account (in `accounts` order), each group in
    /// chronological order. Callers wanting one merged timeline re-sort.
    ///
    /// With `range_start`, points before its day are dropped. If that cut
    /// away earlier history and nothing falls exactly on the boundary day,
    /// an anchor point carrying the last pre-range amount is placed at the
    /// start of the boundary day, so the line does not start from zero.
    pub fn synthesize_chart_series(
        &self,
        accounts: &[Account],
        balances: &[Balance],
        transactions: &[Transaction],
        range_start: Option<DateTime<Utc>>,
    ) -> Vec<ChartPoint> {
        let boundary = range_start.as_ref().map(day::day_key);
        let mut chart = Vec::new();

        for account in accounts {
            let series =
                self.series_service
                    .build_daily_series(&account.id, balances, transactions);
            if series.is_empty() {
                continue;
            }

            let retained = match boundary {
                Some(start) => Self::clip_to_range(series, start),
                None => series,
            };

            chart.extend(retained.into_iter().map(|point| ChartPoint {
                id: ChartPoint::composite_id(&account.id, point.day_key),
                account_id: account.id.clone(),
                amount: point.amount,
                date: point.date,
            }));
        }

        chart
    }

    /// Daily balance-sheet totals across all accounts.
    ///
    /// Built on top of [`Self::synthesize_chart_series`], so the range and
    /// its anchor points apply. Every day that has a point for any account
    /// gets a total; each account contributes its closing amount on or
    /// before that day. Asset accounts add to `assets`, liability accounts
    /// add their absolute balance to `liabilities`, other types are ignored.
    pub fn net_worth_series(
        &self,
        accounts: &[Account],
        balances: &[Balance],
        transactions: &[Transaction],
        range_start: Option<DateTime<Utc>>,
    ) -> Vec<NetWorthPoint> {
        let chart = self.synthesize_chart_series(accounts, balances, transactions, range_start);

        // Closing amount of each account per day (last point of the day wins).
        let mut closing: HashMap<&str, BTreeMap<NaiveDate, f64>> = HashMap::new();
        let mut days = BTreeSet::new();
        for point in &chart {
            let day_key = day::day_key(&point.date);
            days.insert(day_key);
            closing
                .entry(point.account_id.as_str())
                .or_default()
                .insert(day_key, point.amount);
        }

        days.into_iter()
            .map(|day_key| {
                let mut assets = 0.0;
                let mut liabilities = 0.0;

                for account in accounts {
                    let Some(amount) = closing
                        .get(account.id.as_str())
                        .and_then(|by_day| by_day.range(..=day_key).next_back())
                        .map(|(_, amount)| *amount)
                    else {
                        continue;
                    };

                    match account.account_type {
                        AccountType::Asset => assets += amount,
                        AccountType::Liability => liabilities += amount.abs(),
                        AccountType::Equity | AccountType::Other => {}
                    }
                }

                let assets = round_currency(assets);
                let liabilities = round_currency(liabilities);
                NetWorthPoint {
                    day_key,
                    date: day::start_of_day(day_key),
                    assets,
                    liabilities,
                    net_worth: round_currency(assets - liabilities),
                }
            })
            .collect()
    }

    /// Drop points before `start` and prepend an anchor when history was cut.
    fn clip_to_range(mut series: Vec<DailyBalancePoint>, start: NaiveDate) -> Vec<DailyBalancePoint> {
        // The series is chronological, so day keys are sorted.
        let first_inside = series.partition_point(|p| p.day_key < start);
        let carried = (first_inside > 0 && first_inside < series.len())
            .then(|| series[first_inside - 1].amount);

        let mut retained = series.split_off(first_inside);

        if let Some(amount) = carried {
            if retained.first().map(|p| p.day_key) != Some(start) {
                retained.insert(
                    0,
                    DailyBalancePoint {
                        day_key: start,
                        date: day::start_of_day(start),
                        amount,
                    },
                );
            }
        }

        retained
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
