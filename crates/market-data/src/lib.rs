//! StockTrack Market Data Crate
//!
//! Fetches a stock quote from one of several upstream providers and
//! normalizes it into a single canonical record.
//!
//! # Overview
//!
//! - Two providers: Alpha Vantage (quote plus company overview) and Finnhub
//!   (quote only)
//! - Provider selection through configuration, resolved per lookup
//! - A canonical [`StockData`] record whose values are all text
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | QuoteDispatcher  |  (provider selection)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Provider      | --> | CompanyOverview  |  (Alpha Vantage only)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |    StockData     |  (canonical record)
//! +------------------+
//! ```

pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod provider;

pub use dispatcher::QuoteDispatcher;
pub use errors::MarketDataError;
pub use models::{CompanyOverview, ProviderKind, ProviderSettings, StockData};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::finnhub::FinnhubProvider;
pub use provider::StockDataProvider;
