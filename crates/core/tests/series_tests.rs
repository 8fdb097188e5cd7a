// ═══════════════════════════════════════════════════════════════════
// Balance History Tests — SeriesService daily series & current balance
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use net_worth_tracker_core::models::balance::Balance;
use net_worth_tracker_core::models::transaction::{Transaction, TransactionKind};
use net_worth_tracker_core::services::series_service::SeriesService;

const ACC: &str = "acc-1";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, h, min, s).unwrap()
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

fn snapshot(id: &str, account_id: &str, amount: f64, date: DateTime<Utc>) -> Balance {
    Balance {
        id: id.into(),
        account_id: account_id.into(),
        amount,
        date,
    }
}

fn tx(
    id: &str,
    account_id: Option<&str>,
    kind: TransactionKind,
    amount: f64,
    date: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.into(),
        account_id: account_id.map(str::to_string),
        amount,
        date,
        description: String::new(),
        category: String::new(),
        kind,
        sequence: 0,
    }
}

fn amounts(points: &[net_worth_tracker_core::models::series::DailyBalancePoint]) -> Vec<f64> {
    points.iter().map(|p| p.amount).collect()
}

// ── Empty input ─────────────────────────────────────────────────────

mod empty_input {
    use super::*;

    #[test]
    fn no_snapshots_no_transactions_gives_empty_series() {
        let service = SeriesService::new();
        assert!(service.build_daily_series(ACC, &[], &[]).is_empty());
    }

    #[test]
    fn current_balance_defaults_to_zero() {
        let service = SeriesService::new();
        assert_eq!(service.current_balance(ACC, &[], &[]), 0.0);
    }

    #[test]
    fn other_accounts_data_is_ignored() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", "other", 500.0, midnight(d(2025, 1, 10)))];
        let txs = vec![tx("t1", Some("other"), TransactionKind::Income, 5.0, at(2025, 1, 10, 9, 0, 0))];

        assert!(service.build_daily_series(ACC, &balances, &txs).is_empty());
        assert_eq!(service.current_balance(ACC, &balances, &txs), 0.0);
    }

    #[test]
    fn unlinked_transactions_are_ignored() {
        let service = SeriesService::new();
        let txs = vec![tx("t1", None, TransactionKind::Income, 5.0, at(2025, 1, 10, 9, 0, 0))];
        assert!(service.build_daily_series(ACC, &[], &txs).is_empty());
    }
}

// ── Snapshots ───────────────────────────────────────────────────────

mod snapshots {
    use super::*;

    #[test]
    fn snapshot_sets_current_balance() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10)))];

        let series = service.build_daily_series(ACC, &balances, &[]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].day_key, d(2025, 1, 10));
        assert_eq!(series[0].date, midnight(d(2025, 1, 10)));
        assert_eq!(series[0].amount, 100.0);
        assert_eq!(service.current_balance(ACC, &balances, &[]), 100.0);
    }

    #[test]
    fn snapshot_amount_is_rounded() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 10.125, midnight(d(2025, 1, 10)))];
        assert_eq!(service.current_balance(ACC, &balances, &[]), 10.13);
    }

    #[test]
    fn later_snapshot_replaces_running_balance() {
        let service = SeriesService::new();
        let balances = vec![
            snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10))),
            snapshot("b2", ACC, 40.0, midnight(d(2025, 1, 12))),
        ];
        let txs = vec![tx("t1", Some(ACC), TransactionKind::Income, 25.0, at(2025, 1, 11, 8, 0, 0))];

        let series = service.build_daily_series(ACC, &balances, &txs);
        assert_eq!(amounts(&series), vec![100.0, 125.0, 40.0]);
    }

    #[test]
    fn non_midnight_snapshot_is_ignored() {
        let service = SeriesService::new();
        let balances = vec![
            snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10))),
            snapshot("b2", ACC, 999.0, at(2025, 1, 11, 14, 30, 0)),
        ];

        let series = service.build_daily_series(ACC, &balances, &[]);
        assert_eq!(series.len(), 1);
        assert_eq!(service.current_balance(ACC, &balances, &[]), 100.0);
    }

    #[test]
    fn one_millisecond_past_midnight_is_not_pure() {
        let service = SeriesService::new();
        let balances = vec![snapshot(
            "b1",
            ACC,
            100.0,
            midnight(d(2025, 1, 10)) + Duration::milliseconds(1),
        )];
        assert!(service.build_daily_series(ACC, &balances, &[]).is_empty());
    }

    #[test]
    fn same_day_tie_goes_to_later_input() {
        let service = SeriesService::new();
        let balances = vec![
            snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10))),
            snapshot("b2", ACC, 150.0, midnight(d(2025, 1, 10))),
        ];

        let series = service.build_daily_series(ACC, &balances, &[]);
        assert_eq!(series.len(), 1, "one authoritative snapshot per day");
        assert_eq!(series[0].amount, 150.0);
    }
}

// ── Transaction accrual ─────────────────────────────────────────────

mod accrual {
    use super::*;

    #[test]
    fn expense_after_snapshot_same_day() {
        let service = SeriesService::new();
        let day = d(2025, 1, 10);
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(day))];
        let txs = vec![tx("t1", Some(ACC), TransactionKind::Expense, 30.0, at(2025, 1, 10, 17, 0, 0))];

        let series = service.build_daily_series(ACC, &balances, &txs);
        assert_eq!(series.len(), 2);
        assert_eq!(amounts(&series), vec![100.0, 70.0]);
        assert!(series.iter().all(|p| p.day_key == day));
    }

    #[test]
    fn carry_forward_across_days_without_snapshot() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 50.0, midnight(d(2025, 1, 10)))];
        let txs = vec![tx("t1", Some(ACC), TransactionKind::Income, 10.0, at(2025, 1, 12, 9, 0, 0))];

        assert_eq!(service.current_balance(ACC, &balances, &txs), 60.0);
    }

    #[test]
    fn transactions_before_first_snapshot_start_from_zero() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 500.0, midnight(d(2025, 1, 12)))];
        let txs = vec![tx("t1", Some(ACC), TransactionKind::Expense, 5.0, at(2025, 1, 10, 9, 0, 0))];

        let series = service.build_daily_series(ACC, &balances, &txs);
        assert_eq!(amounts(&series), vec![-5.0, 500.0]);
    }

    #[test]
    fn each_step_is_rounded_to_cents() {
        let service = SeriesService::new();
        let txs = vec![
            tx("t1", Some(ACC), TransactionKind::Income, 0.1, at(2025, 1, 10, 9, 0, 0)),
            tx("t2", Some(ACC), TransactionKind::Income, 0.2, at(2025, 1, 10, 10, 0, 0)),
        ];

        let series = service.build_daily_series(ACC, &[], &txs);
        assert_eq!(amounts(&series), vec![0.1, 0.3]);
    }

    #[test]
    fn event_points_are_offset_by_seconds_from_midnight() {
        let service = SeriesService::new();
        let day = d(2025, 1, 10);
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(day))];
        let txs = vec![
            tx("t1", Some(ACC), TransactionKind::Expense, 1.0, at(2025, 1, 10, 8, 0, 0)),
            tx("t2", Some(ACC), TransactionKind::Expense, 2.0, at(2025, 1, 10, 20, 0, 0)),
        ];

        let series = service.build_daily_series(ACC, &balances, &txs);
        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                midnight(day),
                midnight(day) + Duration::seconds(1),
                midnight(day) + Duration::seconds(2),
            ]
        );
    }

    #[test]
    fn snapshot_point_precedes_same_day_transactions() {
        let service = SeriesService::new();
        let day = d(2025, 1, 10);
        // Transaction listed first in input, still applied after the snapshot.
        let txs = vec![tx("t1", Some(ACC), TransactionKind::Income, 5.0, at(2025, 1, 10, 0, 0, 0))];
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(day))];

        let series = service.build_daily_series(ACC, &balances, &txs);
        assert_eq!(amounts(&series), vec![100.0, 105.0]);
    }
}

// ── Ordering ────────────────────────────────────────────────────────

mod ordering {
    use super::*;

    #[test]
    fn transactions_apply_in_timestamp_order() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10)))];
        let txs = vec![
            tx("late", Some(ACC), TransactionKind::Expense, 50.0, at(2025, 1, 10, 18, 0, 0)),
            tx("early", Some(ACC), TransactionKind::Income, 20.0, at(2025, 1, 10, 9, 0, 0)),
        ];

        let series = service.build_daily_series(ACC, &balances, &txs);
        assert_eq!(amounts(&series), vec![100.0, 120.0, 70.0]);
    }

    #[test]
    fn identical_timestamps_keep_insertion_order() {
        let service = SeriesService::new();
        let balances = vec![snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10)))];
        let same = at(2025, 1, 10, 12, 0, 0);

        let forward = vec![
            tx("t1", Some(ACC), TransactionKind::Income, 10.0, same),
            tx("t2", Some(ACC), TransactionKind::Expense, 3.0, same),
        ];
        let backward = vec![forward[1].clone(), forward[0].clone()];

        assert_eq!(
            amounts(&service.build_daily_series(ACC, &balances, &forward)),
            vec![100.0, 110.0, 107.0]
        );
        assert_eq!(
            amounts(&service.build_daily_series(ACC, &balances, &backward)),
            vec![100.0, 97.0, 107.0]
        );
    }

    #[test]
    fn sequence_number_breaks_timestamp_ties_before_input_order() {
        let service = SeriesService::new();
        let same = at(2025, 1, 10, 12, 0, 0);

        let mut first = tx("t1", Some(ACC), TransactionKind::Income, 10.0, same);
        first.sequence = 1;
        let mut second = tx("t2", Some(ACC), TransactionKind::Expense, 3.0, same);
        second.sequence = 2;

        // Input order is reversed; sequence wins.
        let series = service.build_daily_series(ACC, &[], &[second, first]);
        assert_eq!(amounts(&series), vec![10.0, 7.0]);
    }

    #[test]
    fn days_are_chronological_regardless_of_input_order() {
        let service = SeriesService::new();
        let balances = vec![
            snapshot("b3", ACC, 300.0, midnight(d(2025, 3, 1))),
            snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 1))),
            snapshot("b2", ACC, 200.0, midnight(d(2025, 2, 1))),
        ];

        let series = service.build_daily_series(ACC, &balances, &[]);
        let days: Vec<_> = series.iter().map(|p| p.day_key).collect();
        assert_eq!(days, vec![d(2025, 1, 1), d(2025, 2, 1), d(2025, 3, 1)]);
    }
}

// ── Determinism ─────────────────────────────────────────────────────

mod determinism {
    use super::*;

    #[test]
    fn repeated_calls_return_identical_output() {
        let service = SeriesService::new();
        let balances = vec![
            snapshot("b1", ACC, 100.0, midnight(d(2025, 1, 10))),
            snapshot("b2", ACC, 80.0, midnight(d(2025, 1, 15))),
        ];
        let txs = vec![
            tx("t1", Some(ACC), TransactionKind::Income, 12.34, at(2025, 1, 11, 9, 0, 0)),
            tx("t2", Some(ACC), TransactionKind::Expense, 5.5, at(2025, 1, 11, 9, 0, 0)),
            tx("t3", Some(ACC), TransactionKind::Expense, 1.01, at(2025, 1, 16, 9, 0, 0)),
        ];

        let first = service.build_daily_series(ACC, &balances, &txs);
        for _ in 0..5 {
            assert_eq!(service.build_daily_series(ACC, &balances, &txs), first);
        }
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&service.build_daily_series(ACC, &balances, &txs)).unwrap()
        );
    }
}
