use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use anyhow::Context;
use stocktrack_market_data::ProviderSettings;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: String,
    pub providers: ProviderSettings,
}

impl Config {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = var("HOST")
            .unwrap_or_else(|| "0.0.0.0".into())
            .trim()
            .parse()
            .context("Invalid HOST")?;
        let port: u16 = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .trim()
            .parse()
            .context("Invalid PORT")?;
        let cors_allow = var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(30000);
        let log_format = var("LOG_FORMAT").unwrap_or_else(|| "text".into());

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
            providers: ProviderSettings::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.cors_allow, vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, "text");
        assert_eq!(config.providers.provider, None);
        assert_eq!(config.providers.api_key, None);
    }

    #[test]
    fn test_reads_variables() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
            ("REQUEST_TIMEOUT_MS", "5000"),
            ("LOG_FORMAT", "json"),
            ("STOCK_API_PROVIDER", "finnhub"),
            ("STOCK_API_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, "json");
        assert_eq!(config.providers.provider.as_deref(), Some("finnhub"));
        assert_eq!(config.providers.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = config(&[("PORT", ""), ("CORS_ALLOW_ORIGINS", " ")]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.cors_allow, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("HOST", "not-an-ip")]).is_err());
    }
}
