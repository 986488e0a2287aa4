//! Company overview payload and its merge into [`StockData`].
//!
//! The overview endpoint returns a flat object of fundamentals whose values
//! are almost all strings. Only string values are kept; they are copied
//! verbatim onto the record through a fixed key-to-field mapping.

use std::collections::HashMap;

use super::stock::StockData;

/// Record field filled by an overview key, if the key is mapped.
fn overview_field<'a>(stock: &'a mut StockData, key: &str) -> Option<&'a mut String> {
    let field = match key {
        "Name" => &mut stock.name,
        "Description" => &mut stock.description,
        "Exchange" => &mut stock.exchange,
        "Currency" => &mut stock.currency,
        "Country" => &mut stock.country,
        "Sector" => &mut stock.sector,
        "Industry" => &mut stock.industry,
        "Address" => &mut stock.address,
        "52WeekHigh" => &mut stock.week_52_high,
        "52WeekLow" => &mut stock.week_52_low,
        "50DayMovingAverage" => &mut stock.ma_50,
        "200DayMovingAverage" => &mut stock.ma_200,
        "MarketCapitalization" => &mut stock.market_cap,
        "PERatio" => &mut stock.pe_ratio,
        "PEGRatio" => &mut stock.peg_ratio,
        "BookValue" => &mut stock.book_value,
        "DividendPerShare" => &mut stock.dividend_per_share,
        "DividendYield" => &mut stock.dividend_yield,
        "EPS" => &mut stock.eps,
        "RevenuePerShareTTM" => &mut stock.revenue_per_share_ttm,
        "ProfitMargin" => &mut stock.profit_margin,
        "OperatingMarginTTM" => &mut stock.operating_margin_ttm,
        "ReturnOnAssetsTTM" => &mut stock.return_on_assets_ttm,
        "ReturnOnEquityTTM" => &mut stock.return_on_equity_ttm,
        "RevenueTTM" => &mut stock.revenue_ttm,
        "GrossProfitTTM" => &mut stock.gross_profit_ttm,
        "QuarterlyEarningsGrowthYOY" => &mut stock.quarterly_earnings_growth_yoy,
        "QuarterlyRevenueGrowthYOY" => &mut stock.quarterly_revenue_growth_yoy,
        "Beta" => &mut stock.beta,
        "SharesOutstanding" => &mut stock.shares_outstanding,
        "AnalystTargetPrice" => &mut stock.analyst_target_price,
        "LatestQuarter" => &mut stock.latest_quarter,
        "ExDividendDate" => &mut stock.ex_dividend_date,
        "DividendDate" => &mut stock.dividend_date,
        _ => return None,
    };
    Some(field)
}

/// String-valued entries of an overview response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyOverview {
    fields: HashMap<String, String>,
}

impl CompanyOverview {
    /// Parse an overview body. The body must be a JSON object; entries whose
    /// value is not a string are dropped.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)?;
        Ok(raw.into_iter().collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy every mapped key present in the overview onto `stock`.
    /// Fields whose key is absent are left untouched.
    pub fn merge_into(&self, stock: &mut StockData) {
        for (key, value) in &self.fields {
            if let Some(field) = overview_field(stock, key) {
                field.clone_from(value);
            }
        }
    }
}

impl FromIterator<(String, serde_json::Value)> for CompanyOverview {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();
        Self { fields }
    }
}
