// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::PricePoint;

fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// EMA over the whole series, seeded with the first close:
/// `ema = close * k + prev * (1 - k)` with `k = 2 / (period + 1)`.
///
/// A one-point series yields that point. Empty input or `period == 0` is `None`.
pub fn exponential_moving_average(series: &[f64], period: usize) -> Option<f64> {
    let (&first, rest) = series.split_first()?;
    if period == 0 {
        return None;
    }
    let k = multiplier(period);
    Some(rest.iter().fold(first, |prev, &close| close * k + prev * (1.0 - k)))
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    // First-close seeding means every index has a value, including index 0.
    fn calculate(&self, data: &[PricePoint]) -> Vec<Option<f64>> {
        if data.is_empty() || self.period == 0 {
            return vec![None; data.len()];
        }

        let k = multiplier(self.period);
        let mut previous_ema = data[0].close;
        let mut results = Vec::with_capacity(data.len());
        results.push(Some(previous_ema));

        for point in data.iter().skip(1) {
            let ema = point.close * k + previous_ema * (1.0 - k);
            results.push(Some(ema));
            previous_ema = ema;
        }
        results
    }
}
