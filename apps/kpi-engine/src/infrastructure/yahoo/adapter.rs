//! Yahoo Finance chart adapter.
//!
//! One endpoint serves both ports: [`HistorySource`] passes the caller's
//! period/interval straight through, and [`QuoteSource`] derives a quote
//! from the trailing two minute-closes of a two-day chart.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::application::ports::{HistorySource, QuoteSource, SourceError};
use crate::domain::market::{HistorySeries, Quote};

use super::api_types::ChartResponse;

/// Default Yahoo Finance chart endpoint.
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Fixed per-call timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Range/interval used when deriving a current quote.
const QUOTE_RANGE: &str = "2d";
const QUOTE_INTERVAL: &str = "1m";

/// Configuration for the Yahoo chart adapter.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Endpoint base URL.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

impl YahooConfig {
    /// Override the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Keyless chart adapter.
#[derive(Debug, Clone)]
pub struct YahooChartAdapter {
    client: Client,
    config: YahooConfig,
}

impl YahooChartAdapter {
    /// Build the adapter.
    pub fn new(config: YahooConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    /// Fetch a chart and pair timestamps with closes, dropping bars
    /// whose close is missing. Pairing before filtering means the two
    /// sequences cannot desynchronize.
    async fn fetch_points(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<(DateTime<Utc>, Decimal)>, SourceError> {
        let url = format!("{}/v8/finance/chart/{symbol}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
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

        let payload: ChartResponse =
            response.json().await.map_err(|e| SourceError::Upstream {
                status: status.as_u16(),
                message: format!("invalid chart payload: {e}"),
            })?;

        if let Some(err) = payload.chart.error {
            return Err(SourceError::EmptyData {
                message: format!("{}: {}", err.code, err.description),
            });
        }

        let result = payload
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .ok_or_else(|| SourceError::EmptyData {
                message: format!("no chart data for {symbol}"),
            })?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|block| block.close)
            .unwrap_or_default();

        let points: Vec<(DateTime<Utc>, Decimal)> = result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&secs, close)| {
                let close = close?;
                let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)?;
                let price = Decimal::try_from(close).ok()?;
                Some((timestamp, price))
            })
            .collect();

        if points.is_empty() {
            return Err(SourceError::EmptyData {
                message: format!("no close data for {symbol}"),
            });
        }

        Ok(points)
    }
}

#[async_trait]
impl HistorySource for YahooChartAdapter {
    async fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<HistorySeries, SourceError> {
        let points = self.fetch_points(symbol, period, interval).await?;
        Ok(HistorySeries::from_points(symbol, points))
    }
}

#[async_trait]
impl QuoteSource for YahooChartAdapter {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, SourceError> {
        let points = self.fetch_points(symbol, QUOTE_RANGE, QUOTE_INTERVAL).await?;
        let series = HistorySeries::from_points(symbol, points);

        let price = series.last_close().ok_or_else(|| SourceError::EmptyData {
            message: format!("no close data for {symbol}"),
        })?;

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            change: series.latest_change(),
            timestamp: Utc::now(),
        })
    }
}
