use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One bar of a price series. Within a series dates are strictly increasing;
/// nothing here enforces that, callers keep the order the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Closing prices of a series, in order.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    Day1,
    Week1,
}

impl TimeFrame {
    /// Value of the `interval` query parameter understood by the backend.
    pub fn as_query(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Day1 => "1d",
            TimeFrame::Week1 => "1wk",
        }
    }
}

/// How far back a history request reaches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HistoryPeriod {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year5,
    Max,
}

impl HistoryPeriod {
    pub fn as_query(&self) -> &'static str {
        match self {
            HistoryPeriod::Day1 => "1d",
            HistoryPeriod::Day5 => "5d",
            HistoryPeriod::Month1 => "1mo",
            HistoryPeriod::Month3 => "3mo",
            HistoryPeriod::Month6 => "6mo",
            HistoryPeriod::Year1 => "1y",
            HistoryPeriod::Year5 => "5y",
            HistoryPeriod::Max => "max",
        }
    }

    /// Parses the query form back (`"1y"`, `"6mo"`, ...).
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "1d" => Some(HistoryPeriod::Day1),
            "5d" => Some(HistoryPeriod::Day5),
            "1mo" => Some(HistoryPeriod::Month1),
            "3mo" => Some(HistoryPeriod::Month3),
            "6mo" => Some(HistoryPeriod::Month6),
            "1y" => Some(HistoryPeriod::Year1),
            "5y" => Some(HistoryPeriod::Year5),
            "max" => Some(HistoryPeriod::Max),
            _ => None,
        }
    }
}

// ---- Backend payloads ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: String,
    #[serde(alias = "data")]
    pub prices: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    pub symbol: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    pub predictions: Vec<PredictionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub symbol: String,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub sector: String,
    pub change_percent: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub top_symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    pub pair: String,
    pub rate: f64,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub history: Vec<PricePoint>,
}

/// A computed indicator line, aligned index-for-index with its price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}
