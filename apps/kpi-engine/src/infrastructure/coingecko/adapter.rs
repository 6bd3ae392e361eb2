//! CoinGecko spot-price adapter.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::application::ports::{CryptoSource, SourceError};
use crate::domain::market::CryptoPrice;

/// Default CoinGecko endpoint.
const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// Fixed per-call timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the CoinGecko adapter.
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Endpoint base URL.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

impl CoinGeckoConfig {
    /// Override the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Unauthenticated spot-price adapter over the simple/price endpoint.
#[derive(Debug, Clone)]
pub struct CoinGeckoAdapter {
    client: Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoAdapter {
    /// Build the adapter.
    pub fn new(config: CoinGeckoConfig) -> Result<Self, SourceError> {
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
impl CryptoSource for CoinGeckoAdapter {
    async fn fetch_spot_price(&self, coin_id: &str) -> Result<CryptoPrice, SourceError> {
        let url = format!("{}/api/v3/simple/price", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
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

        // Response shape: {"<coin_id>": {"usd": <price>}}. An unknown
        // coin id yields an empty object, which is an error here rather
        // than a null-priced success.
        let payload: HashMap<String, HashMap<String, f64>> =
            response.json().await.map_err(|e| SourceError::Upstream {
                status: status.as_u16(),
                message: format!("invalid price payload: {e}"),
            })?;

        let usd = payload
            .get(coin_id)
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| SourceError::EmptyData {
                message: format!("no usd price for {coin_id}"),
            })?;

        let price = Decimal::try_from(usd).map_err(|_| SourceError::EmptyData {
            message: format!("unrepresentable price for {coin_id}: {usd}"),
        })?;

        Ok(CryptoPrice {
            coin_id: coin_id.to_string(),
            price,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_production() {
        let config = CoinGeckoConfig::default();
        assert!(config.base_url.contains("api.coingecko.com"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn adapter_construction() {
        assert!(CoinGeckoAdapter::new(CoinGeckoConfig::default()).is_ok());
    }
}
