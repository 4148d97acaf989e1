// Analytics entry point: fetch a symbol's history and log its indicators
use analytics::config::AnalyticsSettings;
use analytics::report::snapshot;
use anyhow::{anyhow, bail, Context};
use client::{ApiClient, RequestResult};
use shared::models::{HistoryPeriod, TimeFrame};
use tracing::info;

const USAGE: &str = "usage: analytics <SYMBOL> [PERIOD]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().ok_or_else(|| anyhow!(USAGE))?;

    let settings = AnalyticsSettings::load().context("failed to load analytics settings")?;
    let period = match args.next() {
        Some(raw) => HistoryPeriod::from_query(&raw).ok_or_else(|| anyhow!("unknown period '{}'. {}", raw, USAGE))?,
        None => settings.period()?,
    };

    info!(base_url = %settings.client.base_url, %symbol, period = period.as_query(), "Fetching price history");
    let client = ApiClient::new(settings.client.clone())?;

    let history = match client.price_history(&symbol, period, TimeFrame::Day1).await {
        RequestResult::Success { data } => data,
        RequestResult::Error { error, kind } => bail!("price history request failed ({:?}): {}", kind, error),
    };
    info!(%symbol, points = history.prices.len(), "Price history loaded");

    let Some(snap) = snapshot(&history.prices, &settings)? else {
        info!(%symbol, "No price points returned, nothing to analyse");
        return Ok(());
    };

    info!(
        %symbol,
        last_close = snap.last_close,
        sma = ?snap.sma,
        ema = ?snap.ema,
        rsi = ?snap.rsi,
        sharpe = snap.sharpe,
        "Indicators at last point"
    );
    if let Some(bands) = snap.bollinger {
        info!(%symbol, upper = bands.upper, middle = bands.middle, lower = bands.lower, "Bollinger bands");
    }
    println!("{}", serde_json::to_string_pretty(&snap)?);

    Ok(())
}
