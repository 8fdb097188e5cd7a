//! Calendar-day keys used to group and order snapshots and transactions.
//!
//! A day key is the UTC calendar date of a timestamp. `NaiveDate` orders
//! chronologically and displays as `YYYY-MM-DD`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// The UTC calendar day a timestamp falls on.
#[must_use]
pub fn day_key(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Midnight UTC at the start of `day`.
#[must_use]
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// `true` when `ts` is exactly 00:00:00.000000000 UTC.
#[must_use]
pub fn is_midnight_utc(ts: &DateTime<Utc>) -> bool {
    ts.time() == NaiveTime::MIN
}

/// Timestamp of the `event_index`-th (0-based) transaction on `day`.
///
/// Events sit one second apart starting one second after midnight, so they
/// never collide with the snapshot point or with each other.
#[must_use]
pub fn event_time(day: NaiveDate, event_index: usize) -> DateTime<Utc> {
    start_of_day(day) + Duration::seconds(event_index as i64 + 1)
}
