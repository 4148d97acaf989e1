// Endpoint builders and typed convenience calls for the dashboard backend.
//
// Builders only format paths and query strings; values are inserted as given.
use reqwest::Method;
use serde_json::json;
use shared::models::{
    CurrencyQuote, HistoryPeriod, PredictionSet, PriceHistory, RankingEntry, SectorSnapshot, SymbolMatch, TimeFrame,
};

use crate::client::{ApiClient, RequestOptions};
use crate::result::RequestResult;

pub fn search_symbols(query: &str) -> String {
    format!("/api/stocks/search?q={}", query)
}

pub fn price_history(symbol: &str, period: HistoryPeriod, interval: TimeFrame) -> String {
    format!(
        "/api/stocks/{}/history?period={}&interval={}",
        symbol,
        period.as_query(),
        interval.as_query()
    )
}

pub fn predictions(symbol: &str, days: u32) -> String {
    format!("/api/predictions/{}?days={}", symbol, days)
}

pub fn generate_prediction(symbol: &str) -> String {
    format!("/api/predictions/{}/generate", symbol)
}

pub fn rankings(category: &str, limit: u32) -> String {
    format!("/api/rankings?category={}&limit={}", category, limit)
}

pub fn sector_data(sector: &str) -> String {
    format!("/api/sectors/{}", sector)
}

pub fn currency_data(pair: &str, period: HistoryPeriod) -> String {
    format!("/api/forex/{}?period={}", pair, period.as_query())
}

impl ApiClient {
    pub async fn search_symbols(&self, query: &str) -> RequestResult<Vec<SymbolMatch>> {
        self.request_as(&search_symbols(query), RequestOptions::default(), true).await
    }

    pub async fn price_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: TimeFrame,
    ) -> RequestResult<PriceHistory> {
        self.request_as(&price_history(symbol, period, interval), RequestOptions::default(), true)
            .await
    }

    pub async fn predictions(&self, symbol: &str, days: u32) -> RequestResult<PredictionSet> {
        self.request_as(&predictions(symbol, days), RequestOptions::default(), true).await
    }

    /// Asks the backend to produce a fresh forecast. On success the cached
    /// read for the same horizon is dropped so the next `predictions` call
    /// sees the new data.
    pub async fn generate_prediction(&self, symbol: &str, days: u32) -> RequestResult<PredictionSet> {
        let options = RequestOptions::with_method(Method::POST).json(json!({ "days": days }));
        let result = self.request_as(&generate_prediction(symbol), options, false).await;
        if result.is_success() {
            self.clear_cache_for_endpoint(&predictions(symbol, days)).await;
        }
        result
    }

    pub async fn rankings(&self, category: &str, limit: u32) -> RequestResult<Vec<RankingEntry>> {
        self.request_as(&rankings(category, limit), RequestOptions::default(), true).await
    }

    pub async fn sector_data(&self, sector: &str) -> RequestResult<SectorSnapshot> {
        self.request_as(&sector_data(sector), RequestOptions::default(), true).await
    }

    pub async fn currency_data(&self, pair: &str, period: HistoryPeriod) -> RequestResult<CurrencyQuote> {
        self.request_as(&currency_data(pair, period), RequestOptions::default(), true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, ok, ScriptedTransport};
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn builders_format_query_strings() {
        assert_eq!(search_symbols("AAPL"), "/api/stocks/search?q=AAPL");
        assert_eq!(
            price_history("MSFT", HistoryPeriod::Month6, TimeFrame::Day1),
            "/api/stocks/MSFT/history?period=6mo&interval=1d"
        );
        assert_eq!(predictions("TSLA", 30), "/api/predictions/TSLA?days=30");
        assert_eq!(rankings("gainers", 10), "/api/rankings?category=gainers&limit=10");
        assert_eq!(sector_data("technology"), "/api/sectors/technology");
        assert_eq!(currency_data("EURUSD", HistoryPeriod::Month1), "/api/forex/EURUSD?period=1mo");
    }

    #[tokio::test]
    async fn price_history_decodes_typed_payload() {
        let transport = Arc::new(ScriptedTransport::ok_json(json!({
            "symbol": "AAPL",
            "prices": [
                {"date": "2024-01-02", "open": 185.0, "high": 188.4, "low": 183.9, "close": 185.6, "volume": 82488700.0},
                {"date": "2024-01-03", "open": 184.2, "high": 185.9, "low": 183.4, "close": 184.3, "volume": 58414500.0}
            ]
        })));
        let client = client_with(transport.clone());

        let result = client.price_history("AAPL", HistoryPeriod::Year1, TimeFrame::Day1).await;
        let history = result.into_data().unwrap();
        assert_eq!(history.prices.len(), 2);
        assert_eq!(history.prices[1].close, 184.3);
        assert_eq!(
            transport.last_request().unwrap().url,
            "http://backend.test/api/stocks/AAPL/history?period=1y&interval=1d"
        );
    }

    #[tokio::test]
    async fn rankings_with_missing_fields_fail_schema_check() {
        let transport = Arc::new(ScriptedTransport::ok_json(json!([{"rank": 1, "symbol": "NVDA"}])));
        let client = client_with(transport);

        let result = client.rankings("gainers", 5).await;
        assert_eq!(result.error_kind(), Some(ErrorKind::Schema));
    }

    #[tokio::test]
    async fn generate_prediction_invalidates_cached_read() {
        let prediction = json!({
            "symbol": "AAPL",
            "predictions": [{"date": "2024-02-01", "predicted_close": 190.0}]
        });
        let transport = Arc::new(ScriptedTransport::new(move |_| Ok(ok(prediction.to_string()))));
        let client = client_with(transport.clone());

        assert!(client.predictions("AAPL", 7).await.is_success());
        assert!(client.predictions("AAPL", 7).await.is_success());
        assert_eq!(transport.calls(), 1);

        let generated = client.generate_prediction("AAPL", 7).await;
        assert!(generated.is_success());
        let post = transport.last_request().unwrap();
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.url, "http://backend.test/api/predictions/AAPL/generate");
        assert_eq!(post.body, Some(json!({"days": 7})));

        assert!(client.predictions("AAPL", 7).await.is_success());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn search_symbols_is_cached() {
        let transport = Arc::new(ScriptedTransport::ok_json(json!([
            {"symbol": "AAPL", "name": "Apple Inc.", "exchange": "NASDAQ"}
        ])));
        let client = client_with(transport.clone());

        let first = client.search_symbols("app").await;
        let second = client.search_symbols("app").await;
        assert_eq!(first.data().map(|m| m.len()), Some(1));
        assert_eq!(first, second);
        assert_eq!(transport.calls(), 1);
    }
}
