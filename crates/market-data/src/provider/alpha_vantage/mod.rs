//! Alpha Vantage stock data provider implementation.
//!
//! A lookup makes two calls against the `query` endpoint:
//! - `GLOBAL_QUOTE` for the real-time price block (required)
//! - `OVERVIEW` for company fundamentals (best effort)
//!
//! When the overview call fails for any reason the quote-only record is
//! returned. A failed quote call fails the lookup.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute and
//! answers an over-limit request with an empty quote.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{
    CompanyOverview, ProviderSettings, StockData, ALPHA_VANTAGE_BASE_URL, API_KEY_ENV,
    UPSTREAM_TIMEOUT,
};
use crate::provider::{build_client, StockDataProvider};

const PROVIDER_ID: &str = "alphavantage";

/// Alpha Vantage stock data provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "02. open")]
    open: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

impl GlobalQuote {
    fn into_stock_data(self) -> StockData {
        StockData {
            symbol: self.symbol,
            price: self.price,
            open: self.open,
            high: self.high,
            low: self.low,
            previous_close: self.previous_close,
            change: self.change,
            change_percent: self.change_percent,
            volume: self.volume,
            last_updated: self.latest_trading_day,
            provider: PROVIDER_ID.to_string(),
            ..Default::default()
        }
    }
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a provider against the public Alpha Vantage endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: build_client(UPSTREAM_TIMEOUT),
            api_key,
            base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    /// Create a provider sharing `client`, configured from `settings`.
    pub fn from_settings(client: Client, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.alpha_vantage_base_url.clone(),
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

    fn api_key(&self) -> Result<&str, MarketDataError> {
        self.api_key
            .as_deref()
            .ok_or(MarketDataError::MissingCredential {
                env_var: API_KEY_ENV,
            })
    }

    /// Make a request to the Alpha Vantage query endpoint.
    async fn fetch(
        &self,
        function: &'static str,
        endpoint: &'static str,
        symbol: &str,
        api_key: &str,
    ) -> Result<String, MarketDataError> {
        debug!(
            "Alpha Vantage request: function={} symbol={} apikey=***",
            function, symbol
        );

        let transport = |source| MarketDataError::UpstreamUnavailable {
            provider: PROVIDER_ID,
            endpoint,
            source,
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("function", function), ("symbol", symbol), ("apikey", api_key)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::UpstreamStatus {
                provider: PROVIDER_ID,
                endpoint,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }

    /// Fetch the real-time quote block.
    async fn fetch_quote(&self, symbol: &str, api_key: &str) -> Result<StockData, MarketDataError> {
        let text = self.fetch("GLOBAL_QUOTE", "quote", symbol, api_key).await?;

        let response: GlobalQuoteResponse = serde_json::from_str(&text)
            .map_err(|e| MarketDataError::unparseable(PROVIDER_ID, "quote", e))?;

        // Unknown tickers and rate-limit notes both come back without a symbol
        let quote = response.global_quote.unwrap_or_default();
        if quote.symbol.is_empty() {
            return Err(MarketDataError::InvalidSymbolOrRateLimited(
                symbol.to_string(),
            ));
        }

        Ok(quote.into_stock_data())
    }

    /// Fetch company overview and fundamentals.
    async fn fetch_overview(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<CompanyOverview, MarketDataError> {
        let text = self.fetch("OVERVIEW", "overview", symbol, api_key).await?;

        CompanyOverview::from_json(&text)
            .map_err(|e| MarketDataError::unparseable(PROVIDER_ID, "overview", e))
    }
}

#[async_trait]
impl StockDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_stock_data(&self, symbol: &str) -> Result<StockData, MarketDataError> {
        let api_key = self.api_key()?;

        let mut stock = self.fetch_quote(symbol, api_key).await?;

        match self.fetch_overview(symbol, api_key).await {
            Ok(overview) if overview.is_empty() => {
                debug!("Alpha Vantage: empty overview for {}", symbol);
            }
            Ok(overview) => {
                debug!(
                    "Alpha Vantage: merging {} overview fields for {}",
                    overview.len(),
                    symbol
                );
                overview.merge_into(&mut stock);
            }
            Err(e) => {
                warn!(
                    "Alpha Vantage overview unavailable for {}, returning quote only: {}",
                    symbol, e
                );
            }
        }

        Ok(stock)
    }
}

// ============================================================================
// Tests
// ============================================================================
