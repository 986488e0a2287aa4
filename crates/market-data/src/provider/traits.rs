//! Stock data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::StockData;

/// Trait for upstream stock data providers.
///
/// A provider turns one ticker symbol into a complete [`StockData`] record,
/// performing however many upstream calls it needs. Implementations hold no
/// mutable state, so a single instance can serve concurrent lookups.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stocktrack_market_data::{MarketDataError, StockData, StockDataProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl StockDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "fixed"
///     }
///
///     async fn fetch_stock_data(&self, symbol: &str) -> Result<StockData, MarketDataError> {
///         Ok(StockData {
///             symbol: symbol.to_string(),
///             provider: self.id().to_string(),
///             ..Default::default()
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait StockDataProvider: Send + Sync {
    /// Identifier of this provider, written to the `provider` field of
    /// every record it produces.
    fn id(&self) -> &'static str;

    /// Look up one symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Non-empty, uppercased ticker symbol
    ///
    /// # Returns
    ///
    /// The canonical record on success, or a `MarketDataError` on failure.
    async fn fetch_stock_data(&self, symbol: &str) -> Result<StockData, MarketDataError>;
}
