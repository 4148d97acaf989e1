// Relative Strength Index (RSI) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::PricePoint;

/// RSI over a window holding the last `period + 1` closes.
///
/// Gains and losses are averaged over the `period` steps of the window.
/// A window with no losses reads 100; a flat window (no gains, no losses)
/// reads 50. Fewer than two points give `None`.
pub fn rsi(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }

    let (gains, losses) = window.windows(2).fold((0.0, 0.0), |(gains, losses), pair| {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            (gains + change, losses)
        } else {
            (gains, losses - change) // losses are positive values
        }
    });

    let steps = (window.len() - 1) as f64;
    let avg_gain = gains / steps;
    let avg_loss = losses / steps;

    if avg_loss == 0.0 {
        return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PricePoint]) -> Vec<Option<f64>> {
        if data.len() <= self.period || self.period == 0 {
            return vec![None; data.len()];
        }

        let closes = shared::models::closes(data);
        let mut results = vec![None; self.period]; // RSI needs 'period' initial changes
        for i in self.period..closes.len() {
            results.push(rsi(&closes[i - self.period..=i]));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::tests::create_points;

    #[test]
    fn test_rsi_monotonic_window_is_100() {
        let closes: Vec<f64> = (1..=15).map(|i| i as f64).collect();
        assert_eq!(rsi(&closes), Some(100.0));
    }

    #[test]
    fn test_rsi_falling_window_is_0() {
        let closes: Vec<f64> = (1..=15).map(|i| 20.0 - i as f64).collect();
        assert_eq!(rsi(&closes), Some(0.0));
    }

    #[test]
    fn test_rsi_flat_and_short_windows() {
        assert_eq!(rsi(&[100.0; 15]), Some(50.0));
        assert_eq!(rsi(&[100.0]), None);
        assert_eq!(rsi(&[]), None);
    }

    #[test]
    fn test_rsi_mixed_window() {
        // gains: 2 + 2 = 4, losses: 1 + 1 = 2 over 4 steps
        // avg_gain = 1.0, avg_loss = 0.5, rs = 2, rsi = 100 - 100/3
        let value = rsi(&[10.0, 12.0, 11.0, 13.0, 12.0]).unwrap();
        assert!((value - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_stays_in_range() {
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03, 45.61, 46.28,
            46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.25,
        ];
        let results = Rsi::new(14).calculate(&create_points(&closes));

        // We expect 14 `None` values, then a value per remaining point.
        for (i, value) in results.iter().enumerate().take(14) {
            assert_eq!(*value, None, "Expected None at index {}", i);
        }
        for value in &results[14..] {
            let value = value.unwrap();
            assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
        }
        assert_eq!(results[14], rsi(&closes[0..=14]));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let points = create_points(&[1.0; 10]);
        assert_eq!(Rsi::new(14).calculate(&points), vec![None; 10]);
    }

    #[test]
    fn test_rsi_all_gains() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let results = Rsi::new(14).calculate(&create_points(&closes));
        for value in &results[..14] {
            assert_eq!(*value, None);
        }
        for value in &results[14..] {
            assert_eq!(*value, Some(100.0));
        }
    }
}
