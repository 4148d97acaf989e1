// Latest-value summary of a price history, as shown next to a chart
use serde::Serialize;
use serde_json::json;
use shared::models::{closes, IndicatorSeries, PricePoint};

use crate::config::AnalyticsSettings;
use crate::error::Result;
use crate::indicators::{build_calculator, rsi, simple_moving_average, to_series, Bollinger, BollingerBands, IndicatorCalculator};
use crate::metrics::sharpe_ratio;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub last_close: f64,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub bollinger: Option<BollingerBands>,
    pub sharpe: f64,
    pub series: Vec<IndicatorSeries>,
}

/// Computes the configured indicators at the last point of `prices`.
/// Returns `Ok(None)` for an empty history.
pub fn snapshot(prices: &[PricePoint], settings: &AnalyticsSettings) -> Result<Option<IndicatorSnapshot>> {
    let Some(last) = prices.last() else {
        return Ok(None);
    };
    let closes = closes(prices);
    let last_index = closes.len() - 1;

    let series = vec![
        to_series(build_calculator("sma", &json!({ "period": settings.sma_period }))?.as_ref(), prices),
        to_series(build_calculator("ema", &json!({ "period": settings.ema_period }))?.as_ref(), prices),
        to_series(build_calculator("rsi", &json!({ "period": settings.rsi_period }))?.as_ref(), prices),
    ];
    let ema = series[1].values.last().copied().flatten();

    let rsi_value = if closes.len() > settings.rsi_period {
        rsi(&closes[closes.len() - settings.rsi_period - 1..])
    } else {
        None
    };
    let bollinger = Bollinger::new(settings.bollinger_period, settings.bollinger_std_dev)
        .calculate(prices)
        .last()
        .copied()
        .flatten();

    Ok(Some(IndicatorSnapshot {
        last_close: last.close,
        sma: simple_moving_average(&closes, last_index, settings.sma_period),
        ema,
        rsi: rsi_value,
        bollinger,
        sharpe: sharpe_ratio(&closes, settings.risk_free_rate, settings.periods_per_year),
        series,
    }))
}
