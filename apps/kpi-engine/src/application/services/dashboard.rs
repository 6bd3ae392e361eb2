//! Dashboard refresh service.
//!
//! One refresh cycle: simulate orders, aggregate KPIs, then invoke each
//! source independently. Every source tile carries its own result so one
//! failing source never blocks the others. Calls run sequentially; the
//! caller (the refresh loop) serializes ticks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::application::ports::{
    CryptoSource, HistorySource, KpiSink, OrderStore, PushReceipt, QuoteSource, SocialSource,
    SourceError, StoreError,
};
use crate::domain::market::{CryptoPrice, HistorySeries, Quote, SocialProfile};
use crate::domain::orders::{KpiSnapshot, SalesBucket};

use super::sales::SalesService;

/// Failures surfaced by the dashboard service itself.
///
/// Source failures are not here - they stay inside the snapshot tiles.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The order store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The sink push failed.
    #[error(transparent)]
    Push(#[from] SourceError),
}

/// Default lookups performed on every refresh cycle.
#[derive(Debug, Clone)]
pub struct DashboardDefaults {
    /// Equity symbol for the quote and history tiles.
    pub symbol: String,
    /// Coin id for the crypto tile.
    pub coin_id: String,
    /// Handle for the social tile.
    pub social_handle: String,
    /// History window, upstream syntax.
    pub history_period: String,
    /// History bar interval, upstream syntax.
    pub history_interval: String,
    /// Trailing window for the KPI tile, minutes.
    pub kpi_window_minutes: i64,
    /// Trailing window for the sales chart, hours.
    pub sales_window_hours: i64,
    /// Synthetic orders appended per refresh.
    pub orders_per_refresh: u32,
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            coin_id: "bitcoin".to_string(),
            social_handle: "twitter".to_string(),
            history_period: "7d".to_string(),
            history_interval: "1h".to_string(),
            kpi_window_minutes: 60,
            sales_window_hours: 24,
            orders_per_refresh: 2,
        }
    }
}

/// Everything one refresh cycle produced.
///
/// Source tiles keep the uniform success-or-error contract; the HTTP
/// layer renders errors as `{error}` objects.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// When the cycle ran.
    pub generated_at: DateTime<Utc>,
    /// Windowed sales KPIs.
    pub kpis: KpiSnapshot,
    /// Hourly sales totals for the chart.
    pub hourly_sales: Vec<SalesBucket>,
    /// Equity quote tile.
    pub quote: Result<Quote, SourceError>,
    /// Equity history tile.
    pub history: Result<HistorySeries, SourceError>,
    /// Crypto tile.
    pub crypto: Result<CryptoPrice, SourceError>,
    /// Social tile.
    pub social: Result<SocialProfile, SourceError>,
}

/// Orchestrates one refresh cycle over all ports.
pub struct DashboardService<Q, H, C, X, K, S> {
    quotes: Arc<Q>,
    history: Arc<H>,
    crypto: Arc<C>,
    social: Arc<X>,
    sink: Arc<K>,
    sales: SalesService<S>,
    defaults: DashboardDefaults,
}

impl<Q, H, C, X, K, S> DashboardService<Q, H, C, X, K, S>
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    /// Wire the service together.
    pub fn new(
        quotes: Arc<Q>,
        history: Arc<H>,
        crypto: Arc<C>,
        social: Arc<X>,
        sink: Arc<K>,
        sales: SalesService<S>,
        defaults: DashboardDefaults,
    ) -> Self {
        Self {
            quotes,
            history,
            crypto,
            social,
            sink,
            sales,
            defaults,
        }
    }

    /// The sales service, for direct KPI queries.
    pub const fn sales(&self) -> &SalesService<S> {
        &self.sales
    }

    /// Run one refresh cycle.
    ///
    /// Store failures abort the cycle; source failures land in their
    /// tile and the cycle completes.
    pub async fn refresh(&self) -> Result<DashboardSnapshot, DashboardError> {
        let d = &self.defaults;

        self.sales.simulate_orders(d.orders_per_refresh).await?;
        let kpis = self.sales.windowed_kpis(d.kpi_window_minutes).await?;
        let hourly_sales = self.sales.hourly_sales(d.sales_window_hours).await?;

        let quote = self.quotes.fetch_quote(&d.symbol).await;
        if let Err(err) = &quote {
            tracing::warn!(symbol = %d.symbol, error = %err, "quote fetch failed");
        }

        let history = self
            .history
            .fetch_history(&d.symbol, &d.history_period, &d.history_interval)
            .await;
        if let Err(err) = &history {
            tracing::warn!(symbol = %d.symbol, error = %err, "history fetch failed");
        }

        let crypto = self.crypto.fetch_spot_price(&d.coin_id).await;
        if let Err(err) = &crypto {
            tracing::warn!(coin = %d.coin_id, error = %err, "crypto fetch failed");
        }

        let social = self.social.fetch_profile(&d.social_handle).await;
        if let Err(err) = &social {
            tracing::warn!(handle = %d.social_handle, error = %err, "social fetch failed");
        }

        Ok(DashboardSnapshot {
            generated_at: Utc::now(),
            kpis,
            hourly_sales,
            quote,
            history,
            crypto,
            social,
        })
    }

    /// Push the current windowed KPIs to the sink.
    ///
    /// The payload is a single-element array of the aggregate, matching
    /// what downstream streaming sinks ingest row-wise.
    pub async fn push_kpis(&self, destination: Option<&str>) -> Result<PushReceipt, DashboardError> {
        let kpis = self.sales.windowed_kpis(self.defaults.kpi_window_minutes).await?;
        let payload = json!([{
            "timestamp": Utc::now().timestamp(),
            "total_sales": kpis.total_sales,
            "orders": kpis.orders,
            "avg_order_value": kpis.avg_order_value,
        }]);

        let receipt = self.sink.push(&payload, destination).await?;
        tracing::info!(code = receipt.code, "pushed KPIs to sink");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::application::ports::{
        MockCryptoSource, MockHistorySource, MockQuoteSource, MockSocialSource,
    };
    use crate::infrastructure::persistence::InMemoryOrderStore;

    /// Sink stub recording pushes, or refusing when unconfigured.
    struct RecordingSink {
        fail_unconfigured: bool,
        pushes: std::sync::Mutex<Vec<serde_json::Value>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                fail_unconfigured: false,
                pushes: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                fail_unconfigured: true,
                pushes: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl KpiSink for RecordingSink {
        async fn push(
            &self,
            payload: &serde_json::Value,
            destination: Option<&str>,
        ) -> Result<PushReceipt, SourceError> {
            if destination.is_none() && self.fail_unconfigured {
                return Err(SourceError::missing_credential("KPI_PUSH_URL"));
            }
            self.pushes.lock().unwrap().push(payload.clone());
            Ok(PushReceipt::ok(200))
        }
    }

    fn quote_ok() -> MockQuoteSource {
        let mut quotes = MockQuoteSource::new();
        quotes.expect_fetch_quote().returning(|symbol| {
            Ok(Quote {
                symbol: symbol.to_string(),
                price: dec!(187.31),
                change: dec!(-0.42),
                timestamp: Utc::now(),
            })
        });
        quotes
    }

    fn history_ok() -> MockHistorySource {
        let mut history = MockHistorySource::new();
        history.expect_fetch_history().returning(|symbol, _, _| {
            Ok(HistorySeries::from_points(
                symbol,
                vec![(Utc::now(), dec!(186.90)), (Utc::now(), dec!(187.31))],
            ))
        });
        history
    }

    fn crypto_ok() -> MockCryptoSource {
        let mut crypto = MockCryptoSource::new();
        crypto.expect_fetch_spot_price().returning(|coin_id| {
            Ok(CryptoPrice {
                coin_id: coin_id.to_string(),
                price: dec!(64000.12),
                timestamp: Utc::now(),
            })
        });
        crypto
    }

    fn social_ok() -> MockSocialSource {
        let mut social = MockSocialSource::new();
        social.expect_fetch_profile().returning(|username| {
            Ok(SocialProfile {
                username: username.to_string(),
                id: "783214".to_string(),
            })
        });
        social
    }

    fn service_with(
        quotes: MockQuoteSource,
        crypto: MockCryptoSource,
        sink: Arc<RecordingSink>,
    ) -> DashboardService<
        MockQuoteSource,
        MockHistorySource,
        MockCryptoSource,
        MockSocialSource,
        RecordingSink,
        InMemoryOrderStore,
    > {
        DashboardService::new(
            Arc::new(quotes),
            Arc::new(history_ok()),
            Arc::new(crypto),
            Arc::new(social_ok()),
            sink,
            SalesService::new(Arc::new(InMemoryOrderStore::new(1000))),
            DashboardDefaults::default(),
        )
    }

    #[tokio::test]
    async fn refresh_populates_every_tile() {
        let service = service_with(quote_ok(), crypto_ok(), Arc::new(RecordingSink::new()));
        let snapshot = service.refresh().await.unwrap();

        assert_eq!(snapshot.kpis.orders, 2);
        assert!(snapshot.quote.is_ok());
        assert!(snapshot.history.is_ok());
        assert!(snapshot.crypto.is_ok());
        assert!(snapshot.social.is_ok());
        assert!(!snapshot.hourly_sales.is_empty());
    }

    #[tokio::test]
    async fn one_failing_source_leaves_other_tiles_intact() {
        let mut quotes = MockQuoteSource::new();
        quotes.expect_fetch_quote().returning(|_| {
            Err(SourceError::Upstream {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        });

        let service = service_with(quotes, crypto_ok(), Arc::new(RecordingSink::new()));
        let snapshot = service.refresh().await.unwrap();

        assert!(snapshot.quote.is_err());
        assert!(snapshot.history.is_ok());
        assert!(snapshot.crypto.is_ok());
        assert!(snapshot.social.is_ok());
        assert_eq!(snapshot.kpis.orders, 2);
    }

    #[tokio::test]
    async fn repeated_refreshes_accumulate_orders() {
        let service = service_with(quote_ok(), crypto_ok(), Arc::new(RecordingSink::new()));
        service.refresh().await.unwrap();
        service.refresh().await.unwrap();
        let snapshot = service.refresh().await.unwrap();
        assert_eq!(snapshot.kpis.orders, 6);
    }

    #[tokio::test]
    async fn push_kpis_sends_single_element_payload() {
        let sink = Arc::new(RecordingSink::new());
        let service = service_with(quote_ok(), crypto_ok(), Arc::clone(&sink));
        service.refresh().await.unwrap();

        let receipt = service.push_kpis(None).await.unwrap();
        assert_eq!(receipt, PushReceipt::ok(200));

        let pushes = sink.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        let row = &pushes[0][0];
        assert!(row["timestamp"].is_i64());
        assert_eq!(row["orders"], 2);
        assert!(row.get("total_sales").is_some());
        assert!(row.get("avg_order_value").is_some());
    }

    #[tokio::test]
    async fn push_without_destination_fails_as_configuration_error() {
        let service = service_with(quote_ok(), crypto_ok(), Arc::new(RecordingSink::unconfigured()));
        let err = service.push_kpis(None).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Push(SourceError::Configuration { .. })
        ));
    }
}
