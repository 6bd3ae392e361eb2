//! Alpha Vantage quote adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::application::ports::{QuoteSource, SourceError};
use crate::domain::market::Quote;
use crate::infrastructure::config::ApiKey;

use super::api_types::{GlobalQuote, GlobalQuoteResponse};

/// Default Alpha Vantage endpoint.
const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Fixed per-call timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Alpha Vantage adapter.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// API key; `None` degrades every call to a configuration error.
    pub api_key: Option<ApiKey>,
    /// Endpoint base URL.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Create a configuration with the production endpoint.
    #[must_use]
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }

    /// Override the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Keyed quote adapter over the GLOBAL_QUOTE endpoint.
#[derive(Debug, Clone)]
pub struct AlphaVantageQuoteAdapter {
    client: Client,
    config: AlphaVantageConfig,
}

impl AlphaVantageQuoteAdapter {
    /// Build the adapter. Construction succeeds without a key; the
    /// missing credential surfaces per call.
    pub fn new(config: AlphaVantageConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageQuoteAdapter {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, SourceError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(SourceError::missing_credential("ALPHAVANTAGE_API_KEY"));
        };

        let url = format!("{}/query", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: GlobalQuoteResponse =
            response.json().await.map_err(|e| SourceError::Upstream {
                status: status.as_u16(),
                message: format!("invalid quote payload: {e}"),
            })?;

        let quote = payload
            .global_quote
            .filter(GlobalQuote::has_price)
            .ok_or_else(|| SourceError::EmptyData {
                message: format!("no quote data for {symbol}"),
            })?;

        let price = parse_decimal_field(quote.price.as_deref(), "price")?;
        let change = quote
            .change
            .as_deref()
            .map(|c| parse_decimal_field(Some(c), "change"))
            .transpose()?
            .unwrap_or(Decimal::ZERO);

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            change,
            timestamp: Utc::now(),
        })
    }
}

fn parse_decimal_field(value: Option<&str>, field: &str) -> Result<Decimal, SourceError> {
    let raw = value.ok_or_else(|| SourceError::EmptyData {
        message: format!("missing {field} field"),
    })?;
    raw.parse().map_err(|_| SourceError::EmptyData {
        message: format!("unparseable {field}: {raw}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_succeeds_without_key() {
        let adapter = AlphaVantageQuoteAdapter::new(AlphaVantageConfig::new(None));
        assert!(adapter.is_ok());
    }

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let adapter = AlphaVantageQuoteAdapter::new(AlphaVantageConfig::new(None)).unwrap();
        let err = adapter.fetch_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, SourceError::Configuration { .. }));
        assert!(err.to_string().contains("ALPHAVANTAGE_API_KEY"));
    }

    #[test]
    fn parse_decimal_field_rejects_garbage() {
        assert!(parse_decimal_field(Some("187.31"), "price").is_ok());
        assert!(matches!(
            parse_decimal_field(Some("n/a"), "price"),
            Err(SourceError::EmptyData { .. })
        ));
        assert!(matches!(
            parse_decimal_field(None, "price"),
            Err(SourceError::EmptyData { .. })
        ));
    }

    #[test]
    fn config_base_url_override() {
        let config = AlphaVantageConfig::new(None).with_base_url("http://localhost:9999");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
