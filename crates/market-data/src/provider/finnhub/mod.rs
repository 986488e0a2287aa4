//! Finnhub stock data provider implementation.
//!
//! A lookup is a single call to the `/quote` endpoint. Finnhub only returns
//! price figures there, so the record carries no fundamentals.
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::{de, Deserialize};
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{ProviderSettings, StockData, API_KEY_ENV, FINNHUB_BASE_URL, UPSTREAM_TIMEOUT};
use crate::provider::{build_client, StockDataProvider};

const PROVIDER_ID: &str = "finnhub";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Default, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// Timestamp (Unix)
    t: Option<i64>,
    // Note: h, l, o, pc exist but are not part of the record
}

impl QuoteResponse {
    fn into_stock_data(self, symbol: &str) -> Result<StockData, MarketDataError> {
        let price = self.c.unwrap_or_default();

        // Finnhub answers unknown tickers with an all-zero quote
        if price == 0.0 {
            return Err(MarketDataError::InvalidSymbolOrNoData(symbol.to_string()));
        }

        let timestamp = self.t.unwrap_or_default();
        let date = Utc
            .timestamp_opt(timestamp, 0)
            .single()
            .ok_or_else(|| {
                MarketDataError::unparseable(
                    PROVIDER_ID,
                    "quote",
                    de::Error::custom(format_args!("timestamp out of range: {}", timestamp)),
                )
            })?;

        Ok(StockData {
            symbol: symbol.to_string(),
            price: format!("{:.2}", price),
            change: format!("{:.2}", self.d.unwrap_or_default()),
            change_percent: format!("{:.2}%", self.dp.unwrap_or_default()),
            volume: "N/A".to_string(),
            last_updated: date.format("%Y-%m-%d").to_string(),
            provider: PROVIDER_ID.to_string(),
            ..Default::default()
        })
    }
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub stock data provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl FinnhubProvider {
    /// Create a provider against the public Finnhub API.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: build_client(UPSTREAM_TIMEOUT),
            api_key,
            base_url: FINNHUB_BASE_URL.to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    /// Create a provider sharing `client`, configured from `settings`.
    pub fn from_settings(client: Client, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.finnhub_base_url.clone(),
            timeout: settings.timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Make a request to the Finnhub quote endpoint.
    async fn fetch_quote(&self, symbol: &str, token: &str) -> Result<QuoteResponse, MarketDataError> {
        let url = format!("{}/quote", self.base_url.trim_end_matches('/'));
        debug!("Finnhub request: {}?symbol={}&token=***", url, symbol);

        let transport = |source| MarketDataError::UpstreamUnavailable {
            provider: PROVIDER_ID,
            endpoint: "quote",
            source,
        };

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", token)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::UpstreamStatus {
                provider: PROVIDER_ID,
                endpoint: "quote",
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(transport)?;

        serde_json::from_str(&text).map_err(|e| MarketDataError::unparseable(PROVIDER_ID, "quote", e))
    }
}

#[async_trait]
impl StockDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_stock_data(&self, symbol: &str) -> Result<StockData, MarketDataError> {
        let token = self
            .api_key
            .as_deref()
            .ok_or(MarketDataError::MissingCredential {
                env_var: API_KEY_ENV,
            })?;

        self.fetch_quote(symbol, token)
            .await?
            .into_stock_data(symbol)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quote_mock(template: ResponseTemplate) -> Mock {
        Mock::given(method("GET"))
            .and(path("/api/v1/quote"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("token", "test_key"))
            .respond_with(template)
    }

    fn provider(server: &MockServer) -> FinnhubProvider {
        FinnhubProvider::new(Some("test_key".to_string()))
            .with_base_url(format!("{}/api/v1", server.uri()))
    }

    fn apple_quote() -> serde_json::Value {
        json!({
            "c": 150.5,
            "d": 1.25,
            "dp": 0.83,
            "h": 151.2,
            "l": 148.9,
            "o": 149.0,
            "pc": 149.25,
            "t": 1700000000
        })
    }

    #[test]
    fn test_provider_id() {
        let provider = FinnhubProvider::new(None);
        assert_eq!(provider.id(), "finnhub");
    }

    #[test]
    fn test_quote_formatting() {
        let response: QuoteResponse = serde_json::from_value(apple_quote()).unwrap();
        let stock = response.into_stock_data("AAPL").unwrap();

        assert_eq!(stock.symbol, "AAPL");
        assert_eq!(stock.price, "150.50");
        assert_eq!(stock.change, "1.25");
        assert_eq!(stock.change_percent, "0.83%");
        assert_eq!(stock.volume, "N/A");
        assert_eq!(stock.last_updated, "2023-11-14");
        assert_eq!(stock.provider, "finnhub");
        assert_eq!(stock.open, "");
        assert_eq!(stock.previous_close, "");
        assert_eq!(stock.name, "");
    }

    #[test]
    fn test_negative_change_keeps_sign() {
        let response: QuoteResponse =
            serde_json::from_value(json!({"c": 99.999, "d": -2.5, "dp": -2.4378, "t": 0})).unwrap();
        let stock = response.into_stock_data("AAPL").unwrap();

        assert_eq!(stock.price, "100.00");
        assert_eq!(stock.change, "-2.50");
        assert_eq!(stock.change_percent, "-2.44%");
        assert_eq!(stock.last_updated, "1970-01-01");
    }

    #[test]
    fn test_missing_price_is_no_data() {
        let response: QuoteResponse = serde_json::from_value(json!({"c": null})).unwrap();
        let err = response.into_stock_data("AAPL").unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidSymbolOrNoData(ref s) if s == "AAPL"));
    }

    #[test]
    fn test_out_of_range_timestamp_is_unparseable() {
        let response: QuoteResponse =
            serde_json::from_value(json!({"c": 10.0, "t": i64::MAX})).unwrap();
        let err = response.into_stock_data("AAPL").unwrap_err();
        assert!(matches!(err, MarketDataError::ResponseUnparseable { .. }));
        assert!(err.to_string().contains("timestamp out of range"));
    }

    #[tokio::test]
    async fn test_fetch_stock_data() {
        let server = MockServer::start().await;
        quote_mock(ResponseTemplate::new(200).set_body_json(apple_quote()))
            .expect(1)
            .mount(&server)
            .await;

        let stock = provider(&server).fetch_stock_data("AAPL").await.unwrap();

        assert_eq!(stock.price, "150.50");
        assert_eq!(stock.change_percent, "0.83%");
        assert_eq!(stock.volume, "N/A");
        assert_eq!(stock.last_updated, "2023-11-14");
    }

    #[tokio::test]
    async fn test_zero_price_is_invalid_symbol_or_no_data() {
        let server = MockServer::start().await;
        quote_mock(ResponseTemplate::new(200).set_body_json(json!({
            "c": 0, "d": null, "dp": null, "h": 0, "l": 0, "o": 0, "pc": 0, "t": 0
        })))
        .mount(&server)
        .await;

        let err = provider(&server).fetch_stock_data("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidSymbolOrNoData(ref s) if s == "AAPL"));
    }

    #[tokio::test]
    async fn test_identical_lookups_produce_identical_records() {
        let server = MockServer::start().await;
        quote_mock(ResponseTemplate::new(200).set_body_json(apple_quote()))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider(&server);
        let first = provider.fetch_stock_data("AAPL").await.unwrap();
        let second = provider.fetch_stock_data("AAPL").await.unwrap();

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unauthorized_is_upstream_status() {
        let server = MockServer::start().await;
        quote_mock(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_stock_data("AAPL").await.unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::UpstreamStatus {
                provider: "finnhub",
                status: 401,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unparseable() {
        let server = MockServer::start().await;
        quote_mock(ResponseTemplate::new(200).set_body_string("Too many requests"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_stock_data("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::ResponseUnparseable { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_upstream_unavailable() {
        let server = MockServer::start().await;
        quote_mock(
            ResponseTemplate::new(200)
                .set_body_json(apple_quote())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

        let err = provider(&server)
            .with_timeout(Duration::from_millis(200))
            .fetch_stock_data("AAPL")
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider =
            FinnhubProvider::new(None).with_base_url(format!("{}/api/v1", server.uri()));
        let err = provider.fetch_stock_data("AAPL").await.unwrap_err();

        assert!(matches!(err, MarketDataError::MissingCredential { .. }));
    }
}
