// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::PricePoint;

/// Mean of the `window` closes ending at `index`, inclusive.
///
/// No partial windows: `None` when fewer than `window` points exist up to
/// `index`, when `index` is past the end, or when `window` is 0.
pub fn simple_moving_average(series: &[f64], index: usize, window: usize) -> Option<f64> {
    if window == 0 || index >= series.len() || index + 1 < window {
        return None;
    }
    let slice = &series[index + 1 - window..=index];
    Some(slice.iter().sum::<f64>() / window as f64)
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() < self.period {
            return vec![None; data.len()];
        }

        let mut results = vec![None; self.period - 1]; // No SMA for initial period

        // Calculate sum for the first window
        let mut sum: f64 = data.iter().take(self.period).map(|p| p.close).sum();
        results.push(Some(sum / self.period as f64));

        // Slide the window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period].close + data[i].close;
            results.push(Some(sum / self.period as f64));
        }
        results
    }
}
