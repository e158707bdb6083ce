//! Trailing time-window sums.
//!
//! The window ending at bar t covers `(t - window, t]`: bars exactly `window`
//! older than t have already left. NaN observations are skipped; a window
//! holding at least one valid observation yields its sum, a window with none
//! yields NaN. There is no warmup: the first bars sum over whatever is there.

use chrono::{DateTime, Duration, FixedOffset};

/// Rolling sum of `values` over a trailing wall-clock `window`.
///
/// `timestamps` must be ascending and the same length as `values`.
pub fn rolling_time_sum(
    timestamps: &[DateTime<FixedOffset>],
    values: &[f64],
    window: Duration,
) -> Vec<f64> {
    debug_assert_eq!(timestamps.len(), values.len());
    let n = timestamps.len().min(values.len());
    let mut result = Vec::with_capacity(n);

    let mut left = 0;
    let mut sum = 0.0;
    let mut valid = 0usize;

    for i in 0..n {
        let entering = values[i];
        if !entering.is_nan() {
            sum += entering;
            valid += 1;
        }

        let cutoff = timestamps[i] - window;
        while left < i && timestamps[left] <= cutoff {
            let leaving = values[left];
            if !leaving.is_nan() {
                sum -= leaving;
                valid -= 1;
            }
            left += 1;
        }

        if valid == 0 {
            // drop accumulated rounding error once the window drains
            sum = 0.0;
            result.push(f64::NAN);
        } else {
            result.push(sum);
        }
    }

    result
}
