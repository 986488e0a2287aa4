//! Stock data provider abstractions and implementations.
//!
//! This module contains:
//! - The `StockDataProvider` trait that all providers implement
//! - Concrete provider implementations (Alpha Vantage, Finnhub)
//! - The HTTP client shared by providers

mod traits;

pub mod alpha_vantage;
pub mod finnhub;

use std::time::Duration;

use reqwest::Client;

pub use traits::StockDataProvider;

/// Build the HTTP client used for upstream calls.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("stocktrack/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}
