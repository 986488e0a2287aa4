use std::sync::Arc;

use crate::config::Config;
use stocktrack_market_data::QuoteDispatcher;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub dispatcher: Arc<QuoteDispatcher>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let providers = &config.providers;
    tracing::info!(
        "Stock provider: {} (API key {})",
        providers.provider.as_deref().unwrap_or("alphavantage (default)"),
        if providers.api_key.is_some() { "set" } else { "not set" }
    );
    if providers.api_key.is_none() {
        tracing::warn!("STOCK_API_KEY is not set; stock lookups will fail");
    }

    let dispatcher = Arc::new(QuoteDispatcher::new(providers.clone()));
    Arc::new(AppState { dispatcher })
}
