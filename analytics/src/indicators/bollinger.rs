// Bollinger Bands indicator implementation
use super::IndicatorCalculator;
use serde::Serialize;
use serde_json::Value;
use shared::models::PricePoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Mean ± `k` population standard deviations of the window's closes.
/// `None` for an empty window.
pub fn bollinger_bands(window: &[f64], k: f64) -> Option<BollingerBands> {
    if window.is_empty() {
        return None;
    }
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    Some(BollingerBands {
        upper: mean + k * std_dev,
        middle: mean,
        lower: mean - k * std_dev,
    })
}

pub struct Bollinger {
    name: String,
    period: usize,
    num_std: f64,
}

impl Bollinger {
    pub fn new(period: usize, num_std: f64) -> Self {
        Self {
            name: format!("BB({}, {})", period, num_std),
            period,
            num_std,
        }
    }
}

impl IndicatorCalculator for Bollinger {
    type Output = BollingerBands;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "std_dev": self.num_std })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Option<BollingerBands>> {
        if self.period == 0 || data.len() < self.period {
            return vec![None; data.len()];
        }

        let closes = shared::models::closes(data);
        let mut results = vec![None; self.period - 1];
        for window in closes.windows(self.period) {
            results.push(bollinger_bands(window, self.num_std));
        }
        results
    }
}
