use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stocktrack_market_data::MarketDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Failed to fetch stock data")]
    MarketData(#[from] MarketDataError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            ApiError::MarketData(e) => {
                if e.is_upstream() {
                    tracing::warn!("Stock lookup failed: {}", e);
                } else {
                    tracing::error!("Stock lookup misconfigured: {}", e);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string()))
            }
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
            details,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
