// Technical indicators module
//
// Each indicator comes in two forms: a pure point function over closing prices
// (what chart code calls for a single value) and a series calculator over
// `PricePoint`s whose output lines up index-for-index with its input.
pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_bands, Bollinger, BollingerBands};
pub use ema::{exponential_moving_average, Ema};
pub use rsi::{rsi, Rsi};
pub use sma::{simple_moving_average, Sma};

use crate::error::{AnalyticsError, Result};
use serde_json::Value;
use shared::models::{IndicatorSeries, PricePoint};

// Common trait for all series indicators
pub trait IndicatorCalculator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[PricePoint]) -> Vec<Option<Self::Output>>; // None where the value is undefined (e.g. not enough data yet)
}

pub type LineCalculator = Box<dyn IndicatorCalculator<Output = f64>>;

/// Picks a single-line calculator by name (`sma`, `ema`, `rsi`, case-insensitive)
/// with `{"period": n}` parameters. Missing periods default to 20, 20 and 14.
pub fn build_calculator(kind: &str, params: &Value) -> Result<LineCalculator> {
    let kind_lower = kind.to_lowercase();
    let default_period = match kind_lower.as_str() {
        "sma" | "ema" => 20,
        "rsi" => 14,
        _ => {
            tracing::error!(indicator_type = %kind, "Unknown indicator type requested");
            return Err(AnalyticsError::IndicatorError(format!("Unknown indicator type: {}", kind)));
        }
    };

    let period = params.get("period").and_then(|v| v.as_u64()).unwrap_or(default_period) as usize;
    if period == 0 {
        return Err(AnalyticsError::IndicatorError("Indicator period cannot be 0".to_string()));
    }

    let calculator: LineCalculator = match kind_lower.as_str() {
        "sma" => Box::new(Sma::new(period)),
        "ema" => Box::new(Ema::new(period)),
        _ => Box::new(Rsi::new(period)),
    };
    Ok(calculator)
}

/// Runs a line calculator and packages the output for serialization.
pub fn to_series(calculator: &dyn IndicatorCalculator<Output = f64>, data: &[PricePoint]) -> IndicatorSeries {
    IndicatorSeries {
        name: calculator.name().to_string(),
        parameters: calculator.parameters(),
        values: calculator.calculate(data),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    pub(crate) fn create_points(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect()
    }

    #[test]
    fn build_calculator_uses_defaults() {
        let rsi = build_calculator("RSI", &json!({})).unwrap();
        assert_eq!(rsi.name(), "RSI(14)");
        let sma = build_calculator("sma", &json!({"period": 5})).unwrap();
        assert_eq!(sma.parameters(), json!({"period": 5}));
    }

    #[test]
    fn build_calculator_rejects_bad_input() {
        assert!(matches!(
            build_calculator("ema", &json!({"period": 0})),
            Err(AnalyticsError::IndicatorError(_))
        ));
        let err = build_calculator("macd", &json!({})).err().unwrap();
        assert_eq!(err.to_string(), "Indicator calculation error: Unknown indicator type: macd");
    }

    #[test]
    fn to_series_keeps_alignment() {
        let points = create_points(&[1.0, 2.0, 3.0, 4.0]);
        let sma = build_calculator("sma", &json!({"period": 2})).unwrap();
        let series = to_series(sma.as_ref(), &points);
        assert_eq!(series.name, "SMA(2)");
        assert_eq!(series.values, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
    }
}
