use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use stocktrack_market_data::StockData;

const SYMBOL_REQUIRED: &str = "Stock symbol is required";

/// Look up a stock by ticker symbol.
async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<StockData>> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest(SYMBOL_REQUIRED.to_string()));
    }

    tracing::info!("Fetching stock data for {}", symbol);
    let stock = state.dispatcher.fetch_stock_data(&symbol).await?;
    Ok(Json(stock))
}

async fn missing_symbol() -> ApiError {
    ApiError::BadRequest(SYMBOL_REQUIRED.to_string())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stock", get(missing_symbol))
        .route("/api/stock/", get(missing_symbol))
        .route("/api/stock/{symbol}", get(get_stock))
}
