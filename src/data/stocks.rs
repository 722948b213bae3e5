//! Alpha Vantage stock quote client
//!
//! Quotes are requested one symbol at a time. A failed symbol is replaced by a
//! synthetic quote for that symbol only, so the result always holds exactly one
//! entry per requested symbol.

use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::StockQuote;
use crate::random::RandomSource;

/// Default base URL for the Alpha Vantage query endpoint
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Symbols quoted when none are configured
pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "AMZN", "TSLA"];

/// Errors that can occur when fetching a stock quote
#[derive(Debug, Error)]
pub enum StockError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response had no quote body (unknown symbol or rate limit note)
    #[error("No quote returned for symbol: {0}")]
    EmptyQuote(String),

    /// A numeric field could not be parsed
    #[error("Invalid number in field '{field}': {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// `GLOBAL_QUOTE` response wrapper
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<RawQuote>,
}

/// Alpha Vantage returns every field as a string
#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

/// Client for the Alpha Vantage `GLOBAL_QUOTE` function
#[derive(Debug, Clone)]
pub struct StockClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Default for StockClient {
    fn default() -> Self {
        Self::new(ALPHA_VANTAGE_BASE_URL, "demo")
    }
}

impl StockClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetches the latest quote for one symbol
    pub async fn fetch_quote(&self, symbol: &str) -> Result<StockQuote, StockError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        parse_quote(symbol, &text)
    }

    /// Fetches every symbol concurrently, substituting synthetic quotes for failures
    ///
    /// # Returns
    /// One quote per entry in `symbols`, in the same order.
    pub async fn fetch_quotes(&self, symbols: &[String], rng: &RandomSource) -> Vec<StockQuote> {
        let results = join_all(symbols.iter().map(|symbol| self.fetch_quote(symbol))).await;
        merge_quotes(symbols, results, rng)
    }
}

/// Pairs each symbol with its result, filling failures with synthetic data
pub fn merge_quotes(
    symbols: &[String],
    results: Vec<Result<StockQuote, StockError>>,
    rng: &RandomSource,
) -> Vec<StockQuote> {
    symbols
        .iter()
        .zip(results)
        .map(|(symbol, result)| match result {
            Ok(quote) => quote,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "stock quote failed, using synthetic quote");
                synthetic_quote(symbol, rng)
            }
        })
        .collect()
}

/// Generates a plausible quote for `symbol`
pub fn synthetic_quote(symbol: &str, rng: &RandomSource) -> StockQuote {
    let price = rng.float(100.0..500.0, 2);
    let change = rng.float(-10.0..10.0, 2);
    StockQuote {
        symbol: symbol.to_string(),
        price,
        change,
        change_percent: crate::random::round_to(change / price * 100.0, 2),
        volume: u64::from(rng.int(1_000_000..=50_000_000)),
    }
}

fn parse_quote(symbol: &str, body: &str) -> Result<StockQuote, StockError> {
    let response: GlobalQuoteResponse = serde_json::from_str(body)?;
    let raw = response
        .quote
        .filter(|q| !q.symbol.is_empty())
        .ok_or_else(|| StockError::EmptyQuote(symbol.to_string()))?;

    Ok(StockQuote {
        price: parse_number("price", &raw.price)?,
        change: parse_number("change", &raw.change)?,
        change_percent: parse_number("change percent", raw.change_percent.trim_end_matches('%'))?,
        volume: raw
            .volume
            .trim()
            .parse()
            .map_err(|_| StockError::InvalidNumber {
                field: "volume",
                value: raw.volume.clone(),
            })?,
        symbol: raw.symbol,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, StockError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| StockError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
