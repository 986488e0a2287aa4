//! Error types for the market data crate.
//!
//! Every variant is terminal for the lookup that produced it. The only
//! failure that is absorbed inside the crate is the Alpha Vantage overview
//! call, which degrades to a quote-only record instead of surfacing here.

use thiserror::Error;

/// Errors that can occur while looking up a stock quote.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No API key is configured for the selected provider.
    /// Raised before any network call is attempted.
    #[error("{env_var} environment variable not set")]
    MissingCredential {
        /// Name of the configuration variable that should hold the key
        env_var: &'static str,
    },

    /// The configured provider identifier is not one of the known providers.
    #[error("unsupported stock API provider: {0}")]
    UnsupportedProvider(String),

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("failed to fetch {endpoint} data from {provider}: {source}")]
    UpstreamUnavailable {
        /// The provider that was being called
        provider: &'static str,
        /// Which endpoint of the provider failed (quote, overview)
        endpoint: &'static str,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("{provider} {endpoint} endpoint returned HTTP {status}")]
    UpstreamStatus {
        /// The provider that answered
        provider: &'static str,
        /// Which endpoint of the provider answered
        endpoint: &'static str,
        /// The HTTP status code
        status: u16,
    },

    /// The response body could not be decoded into the provider's shape.
    #[error("failed to parse {endpoint} response from {provider}: {source}")]
    ResponseUnparseable {
        /// The provider that returned the body
        provider: &'static str,
        /// Which endpoint of the provider returned the body
        endpoint: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Alpha Vantage returned a quote without a symbol. This happens for
    /// unknown tickers and when the free-tier call limit is reached.
    #[error("invalid symbol or API limit reached: {0}")]
    InvalidSymbolOrRateLimited(String),

    /// Finnhub returned a current price of exactly zero, which it uses to
    /// signal an unknown ticker.
    #[error("invalid symbol or no data available: {0}")]
    InvalidSymbolOrNoData(String),
}

impl MarketDataError {
    pub(crate) fn unparseable(
        provider: &'static str,
        endpoint: &'static str,
        source: serde_json::Error,
    ) -> Self {
        Self::ResponseUnparseable {
            provider,
            endpoint,
            source,
        }
    }

    /// Whether the failure happened while talking to the upstream provider,
    /// as opposed to local configuration problems.
    pub fn is_upstream(&self) -> bool {
        !matches!(
            self,
            Self::MissingCredential { .. } | Self::UnsupportedProvider(_)
        )
    }
}
