//! Monetary rounding helpers shared by every component.

/// Round an amount to whole cents, half away from zero.
///
/// `-0.0` is folded into `0.0` so that a balance that nets out to nothing
/// compares and serializes the same as an untouched one.
#[must_use]
pub fn round_currency(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Add `delta` to `current` and round the result to cents.
#[must_use]
pub fn apply_delta(current: f64, delta: f64) -> f64 {
    round_currency(current + delta)
}
