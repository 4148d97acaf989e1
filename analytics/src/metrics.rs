// Forecast accuracy and return metrics.
//
// All functions return 0.0 instead of NaN/inf when the input is empty,
// mismatched in length, or degenerate.

fn paired<'a>(predictions: &'a [f64], actuals: &'a [f64]) -> Option<impl Iterator<Item = (f64, f64)> + 'a> {
    if predictions.is_empty() || predictions.len() != actuals.len() {
        return None;
    }
    Some(predictions.iter().copied().zip(actuals.iter().copied()))
}

pub fn mean_absolute_error(predictions: &[f64], actuals: &[f64]) -> f64 {
    match paired(predictions, actuals) {
        Some(pairs) => pairs.map(|(p, a)| (p - a).abs()).sum::<f64>() / predictions.len() as f64,
        None => 0.0,
    }
}

pub fn root_mean_square_error(predictions: &[f64], actuals: &[f64]) -> f64 {
    match paired(predictions, actuals) {
        Some(pairs) => {
            let mse = pairs.map(|(p, a)| (p - a).powi(2)).sum::<f64>() / predictions.len() as f64;
            mse.sqrt()
        }
        None => 0.0,
    }
}

/// Average per-point score `max(0, 100 - |p - a| / |a| * 100)`.
///
/// A point whose actual value is 0 scores 100 when the prediction is also 0
/// and 0 otherwise.
pub fn prediction_accuracy(predictions: &[f64], actuals: &[f64]) -> f64 {
    let Some(pairs) = paired(predictions, actuals) else {
        return 0.0;
    };
    let total: f64 = pairs
        .map(|(p, a)| {
            if a == 0.0 {
                if p == 0.0 {
                    100.0
                } else {
                    0.0
                }
            } else {
                (100.0 - (p - a).abs() / a.abs() * 100.0).max(0.0)
            }
        })
        .sum();
    total / predictions.len() as f64
}

/// Simple period-over-period returns. A non-positive previous close gives 0.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Annualised Sharpe ratio of a close series.
///
/// Uses `mean(excess) / std(excess) * sqrt(periods_per_year)` where excess is
/// each simple return minus `risk_free_rate / periods_per_year`, std is the
/// population standard deviation. Returns 0.0 with fewer than 3 closes, zero
/// variance, or `periods_per_year == 0`.
pub fn sharpe_ratio(closes: &[f64], risk_free_rate: f64, periods_per_year: u32) -> f64 {
    if closes.len() < 3 || periods_per_year == 0 {
        return 0.0;
    }
    let per_period_rf = risk_free_rate / periods_per_year as f64;
    let excess: Vec<f64> = simple_returns(closes).into_iter().map(|r| r - per_period_rf).collect();

    let n = excess.len() as f64;
    let mean = excess.iter().sum::<f64>() / n;
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev < 1e-12 {
        return 0.0;
    }
    mean / std_dev * (periods_per_year as f64).sqrt()
}
