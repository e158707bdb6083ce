//! Cumulative traded dollar value.
//!
//! DollarValue[t] = Σ close × volume over bars 0..=t of the table. A bar whose
//! close is NaN reports NaN and contributes nothing to later bars.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct DollarValue;

impl Indicator for DollarValue {
    fn name(&self) -> &str {
        "dollar_value"
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut total = 0.0;
        bars.iter()
            .map(|b| {
                let value = b.traded_value();
                if value.is_nan() {
                    f64::NAN
                } else {
                    total += value;
                    total
                }
            })
            .collect()
    }
}
