//! Rolling Volume-Weighted Average Price (VWAP).
//!
//! VWAP[t] = Σ(typical_price × volume) / Σ(volume) over the trailing time
//! window ending at t, where typical_price = (high + low + close) / 3.
//! A window that traded no volume divides by zero and yields NaN or ±inf;
//! that value is kept as-is.

use super::rolling::rolling_time_sum;
use super::Indicator;
use crate::domain::Bar;
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct Vwap {
    window: Duration,
    name: String,
}

impl Vwap {
    pub fn new(window: Duration) -> Self {
        assert!(window > Duration::zero(), "VWAP window must be positive");
        Self {
            window,
            name: format!("vwap_{}m", window.num_minutes()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Vwap {
    fn default() -> Self {
        Self::new(Duration::minutes(15))
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let timestamps: Vec<_> = bars.iter().map(|b| b.timestamp).collect();
        let tpv: Vec<f64> = bars
            .iter()
            .map(|b| b.typical_price() * b.volume as f64)
            .collect();
        let volume: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();

        let rolling_tpv = rolling_time_sum(&timestamps, &tpv, self.window);
        let rolling_volume = rolling_time_sum(&timestamps, &volume, self.window);

        rolling_tpv
            .iter()
            .zip(&rolling_volume)
            .map(|(tpv, vol)| tpv / vol)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_minute_bars, DEFAULT_EPSILON};

    #[test]
    fn uniform_volume_is_mean_typical_price() {
        // closes 10.00 .. 10.19, typical price == close
        let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64 * 0.01).collect();
        let bars = make_minute_bars(&closes, 100);
        let vwap = Vwap::default().compute(&bars);

        // 15th bar: window holds bars 0..=14
        let expected: f64 = closes[0..15].iter().sum::<f64>() / 15.0;
        assert_approx(vwap[14], expected, DEFAULT_EPSILON);

        // last bar: window holds bars 5..=19
        let expected: f64 = closes[5..20].iter().sum::<f64>() / 15.0;
        assert_approx(vwap[19], expected, DEFAULT_EPSILON);
    }

    #[test]
    fn first_bar_vwap_is_its_typical_price() {
        let bars = make_minute_bars(&[42.0, 43.0], 10);
        let vwap = Vwap::default().compute(&bars);
        assert_approx(vwap[0], 42.0, DEFAULT_EPSILON);
        assert_approx(vwap[1], 42.5, DEFAULT_EPSILON);
    }

    #[test]
    fn heavier_volume_pulls_vwap() {
        let mut bars = make_minute_bars(&[10.0, 20.0], 100);
        bars[1].volume = 300;
        let vwap = Vwap::default().compute(&bars);
        // (10*100 + 20*300) / 400 = 17.5
        assert_approx(vwap[1], 17.5, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_volume_window_is_not_finite() {
        let bars = make_minute_bars(&[10.0, 11.0], 0);
        let vwap = Vwap::default().compute(&bars);
        assert!(vwap.iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn name_reflects_window() {
        assert_eq!(Vwap::new(Duration::minutes(30)).name(), "vwap_30m");
        assert_eq!(Vwap::default().window(), Duration::minutes(15));
    }

    #[test]
    fn no_lookahead() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + (i as f64).sin()).collect();
        let bars = make_minute_bars(&closes, 250);
        let full = Vwap::default().compute(&bars);
        let truncated = Vwap::default().compute(&bars[..18]);
        for (a, b) in truncated.iter().zip(&full) {
            assert_approx(*a, *b, DEFAULT_EPSILON);
        }
    }
}
