use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;

/// Environment variable selecting the provider.
pub const PROVIDER_ENV: &str = "STOCK_API_PROVIDER";
/// Environment variable holding the API key shared by all providers.
pub const API_KEY_ENV: &str = "STOCK_API_KEY";

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Timeout applied to every upstream call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// The closed set of supported upstream providers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Quote plus company overview, two calls per lookup
    #[default]
    AlphaVantage,
    /// Single quote call
    Finnhub,
}

impl ProviderKind {
    /// Identifier used in configuration and in the `provider` field of records.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlphaVantage => "alphavantage",
            Self::Finnhub => "finnhub",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphavantage" => Ok(Self::AlphaVantage),
            "finnhub" => Ok(Self::Finnhub),
            other => Err(MarketDataError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Opaque provider configuration consumed by the dispatcher.
///
/// The provider identifier is kept as raw text and only interpreted at lookup
/// time, so a misconfigured identifier fails the lookup rather than startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub alpha_vantage_base_url: String,
    pub finnhub_base_url: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            alpha_vantage_base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            finnhub_base_url: FINNHUB_BASE_URL.to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }
}

impl ProviderSettings {
    /// Build settings from a variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            provider: var(PROVIDER_ENV),
            api_key: var(API_KEY_ENV),
            alpha_vantage_base_url: var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or(defaults.alpha_vantage_base_url),
            finnhub_base_url: var("FINNHUB_BASE_URL").unwrap_or(defaults.finnhub_base_url),
            timeout: defaults.timeout,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The provider to use for lookups; unset selects the default provider.
    pub fn provider_kind(&self) -> Result<ProviderKind, MarketDataError> {
        match self.provider.as_deref() {
            None => Ok(ProviderKind::default()),
            Some(id) => id.parse(),
        }
    }
}
