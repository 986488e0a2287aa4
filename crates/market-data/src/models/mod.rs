//! Market data models
//!
//! - `stock` - The canonical record returned for a lookup (StockData)
//! - `overview` - Company overview payload and its merge into the record
//! - `provider_settings` - Provider selection and upstream configuration

mod overview;
mod provider_settings;
mod stock;

pub use overview::CompanyOverview;
pub use provider_settings::{
    ProviderKind, ProviderSettings, ALPHA_VANTAGE_BASE_URL, API_KEY_ENV, FINNHUB_BASE_URL,
    PROVIDER_ENV, UPSTREAM_TIMEOUT,
};
pub use stock::StockData;
