//! Provider dispatch for stock lookups.
//!
//! The dispatcher owns one instance of every provider, all sharing a single
//! HTTP client. Each lookup reads the configured provider identifier and
//! delegates to the matching provider; nothing else happens here.

use std::sync::Arc;

use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{ProviderKind, ProviderSettings, StockData};
use crate::provider::alpha_vantage::AlphaVantageProvider;
use crate::provider::finnhub::FinnhubProvider;
use crate::provider::{build_client, StockDataProvider};

/// Routes stock lookups to the configured provider.
pub struct QuoteDispatcher {
    settings: ProviderSettings,
    alpha_vantage: Arc<dyn StockDataProvider>,
    finnhub: Arc<dyn StockDataProvider>,
}

impl QuoteDispatcher {
    /// Create a dispatcher whose providers are built from `settings`.
    pub fn new(settings: ProviderSettings) -> Self {
        let client = build_client(settings.timeout);
        let alpha_vantage = Arc::new(AlphaVantageProvider::from_settings(
            client.clone(),
            &settings,
        ));
        let finnhub = Arc::new(FinnhubProvider::from_settings(client, &settings));

        Self::with_providers(settings, alpha_vantage, finnhub)
    }

    /// Create a dispatcher over explicit provider instances.
    pub fn with_providers(
        settings: ProviderSettings,
        alpha_vantage: Arc<dyn StockDataProvider>,
        finnhub: Arc<dyn StockDataProvider>,
    ) -> Self {
        Self {
            settings,
            alpha_vantage,
            finnhub,
        }
    }

    /// The provider instance serving `kind`.
    pub fn provider(&self, kind: ProviderKind) -> &dyn StockDataProvider {
        match kind {
            ProviderKind::AlphaVantage => self.alpha_vantage.as_ref(),
            ProviderKind::Finnhub => self.finnhub.as_ref(),
        }
    }

    /// Look up `symbol` with the configured provider.
    ///
    /// `symbol` is expected to be non-empty and already uppercased. An
    /// unknown provider identifier fails without any outbound call.
    pub async fn fetch_stock_data(&self, symbol: &str) -> Result<StockData, MarketDataError> {
        let kind = self.settings.provider_kind()?;
        debug!("Dispatching lookup for {} to provider '{}'", symbol, kind);

        self.provider(kind).fetch_stock_data(symbol).await
    }
}
