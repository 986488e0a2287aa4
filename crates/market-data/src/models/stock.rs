use serde::{Deserialize, Serialize};

/// Canonical stock record returned for every lookup, whichever provider
/// produced it.
///
/// Every value is kept as the text the provider sent so that precision and
/// formatting survive the round trip. Fields a provider does not supply stay
/// empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockData {
    // Basic info
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub exchange: String,
    pub currency: String,
    pub country: String,
    pub sector: String,
    pub industry: String,

    // Price data
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub previous_close: String,
    pub volume: String,

    // 52 week range
    pub week_52_high: String,
    pub week_52_low: String,

    // Moving averages
    pub ma_50: String,
    pub ma_200: String,

    // Valuation
    pub market_cap: String,
    pub pe_ratio: String,
    pub peg_ratio: String,
    pub book_value: String,
    pub dividend_per_share: String,
    pub dividend_yield: String,
    pub eps: String,

    // Profitability
    #[serde(rename = "revenuePerShareTTM")]
    pub revenue_per_share_ttm: String,
    pub profit_margin: String,
    #[serde(rename = "operatingMarginTTM")]
    pub operating_margin_ttm: String,
    #[serde(rename = "returnOnAssetsTTM")]
    pub return_on_assets_ttm: String,
    #[serde(rename = "returnOnEquityTTM")]
    pub return_on_equity_ttm: String,

    // Growth
    #[serde(rename = "revenueTTM")]
    pub revenue_ttm: String,
    #[serde(rename = "grossProfitTTM")]
    pub gross_profit_ttm: String,
    #[serde(rename = "quarterlyEarningsGrowthYOY")]
    pub quarterly_earnings_growth_yoy: String,
    #[serde(rename = "quarterlyRevenueGrowthYOY")]
    pub quarterly_revenue_growth_yoy: String,

    // Risk
    pub beta: String,
    pub shares_outstanding: String,

    pub analyst_target_price: String,

    // Dates
    pub last_updated: String,
    pub latest_quarter: String,
    pub ex_dividend_date: String,
    pub dividend_date: String,

    pub address: String,

    /// Identifier of the provider that produced the record
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_names() {
        let data = StockData {
            symbol: "IBM".to_string(),
            week_52_high: "199.18".to_string(),
            ma_50: "185.3".to_string(),
            pe_ratio: "22.1".to_string(),
            revenue_per_share_ttm: "67.2".to_string(),
            quarterly_earnings_growth_yoy: "0.12".to_string(),
            provider: "alphavantage".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["symbol"], "IBM");
        assert_eq!(value["week52High"], "199.18");
        assert_eq!(value["ma50"], "185.3");
        assert_eq!(value["peRatio"], "22.1");
        assert_eq!(value["revenuePerShareTTM"], "67.2");
        assert_eq!(value["quarterlyEarningsGrowthYOY"], "0.12");
        assert_eq!(value["changePercent"], "");
        assert_eq!(value["previousClose"], "");
        assert_eq!(value["exDividendDate"], "");
        assert_eq!(value["provider"], "alphavantage");
    }

    #[test]
    fn test_every_field_is_always_present() {
        let value = serde_json::to_value(StockData::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 45);
        assert!(object.values().all(|v| v == ""));
    }
}
