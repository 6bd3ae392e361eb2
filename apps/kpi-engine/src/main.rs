//! KPI Engine Binary
//!
//! Starts the dashboard backend: a periodic refresh loop over all data
//! sources plus a JSON API for the presentation layer.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin kpi-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Optional credentials (absence degrades the feature to an inline error)
//! - `ALPHAVANTAGE_API_KEY`: Key for the keyed quote source
//! - `SOCIAL_BEARER_TOKEN`: Bearer token for the social source
//! - `KPI_PUSH_URL`: Default destination for KPI pushes
//!
//! ## Optional tunables
//! - `QUOTE_SOURCE`: yahoo | alphavantage (default: yahoo)
//! - `DASHBOARD_SYMBOL`: Equity symbol (default: AAPL)
//! - `DASHBOARD_COIN`: Coin id (default: bitcoin)
//! - `DASHBOARD_SOCIAL_HANDLE`: Social handle (default: twitter)
//! - `REFRESH_INTERVAL_SECS`: Seconds between refresh cycles (default: 10)
//! - `ORDERS_PER_REFRESH`: Simulated orders per cycle (default: 2)
//! - `KPI_WINDOW_MINUTES`: KPI window (default: 60)
//! - `SALES_WINDOW_HOURS`: Sales chart window (default: 24)
//! - `ORDER_STORE_CAPACITY`: Retained orders (default: 10000)
//! - `HTTP_PORT`: JSON API port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kpi_engine::application::ports::{QuoteSource, SourceError};
use kpi_engine::application::services::{DashboardDefaults, DashboardService, SalesService};
use kpi_engine::domain::market::Quote;
use kpi_engine::infrastructure::alphavantage::{AlphaVantageConfig, AlphaVantageQuoteAdapter};
use kpi_engine::infrastructure::coingecko::{CoinGeckoAdapter, CoinGeckoConfig};
use kpi_engine::infrastructure::config::{DashboardConfig, QuoteStrategy};
use kpi_engine::infrastructure::http::{AppState, create_router};
use kpi_engine::infrastructure::persistence::InMemoryOrderStore;
use kpi_engine::infrastructure::sink::{HttpKpiSink, SinkConfig};
use kpi_engine::infrastructure::social::{SocialApiAdapter, SocialApiConfig};
use kpi_engine::infrastructure::yahoo::{YahooChartAdapter, YahooConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

/// Runtime-selected quote strategy.
enum QuoteAdapter {
    /// Keyed single-quote lookup.
    AlphaVantage(AlphaVantageQuoteAdapter),
    /// Keyless chart-derived quote.
    Yahoo(YahooChartAdapter),
}

#[async_trait]
impl QuoteSource for QuoteAdapter {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, SourceError> {
        match self {
            Self::AlphaVantage(adapter) => adapter.fetch_quote(symbol).await,
            Self::Yahoo(adapter) => adapter.fetch_quote(symbol).await,
        }
    }
}

/// Concrete type alias for the wired dashboard service.
type EngineService = DashboardService<
    QuoteAdapter,
    YahooChartAdapter,
    CoinGeckoAdapter,
    SocialApiAdapter,
    HttpKpiSink,
    InMemoryOrderStore,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting KPI Engine");

    let config = DashboardConfig::from_env();
    log_config(&config);

    let service = Arc::new(wire_service(&config)?);
    let latest = Arc::new(RwLock::new(None));

    spawn_refresh_loop(
        Arc::clone(&service),
        Arc::clone(&latest),
        config.refresh_interval_secs,
    );

    let state = AppState {
        service,
        latest,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "JSON API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("KPI Engine stopped");
    Ok(())
}

/// Build every adapter and wire the dashboard service.
fn wire_service(config: &DashboardConfig) -> Result<EngineService, SourceError> {
    let quotes = match config.quote_strategy {
        QuoteStrategy::AlphaVantage => QuoteAdapter::AlphaVantage(AlphaVantageQuoteAdapter::new(
            AlphaVantageConfig::new(config.alphavantage_api_key.clone()),
        )?),
        QuoteStrategy::Yahoo => QuoteAdapter::Yahoo(YahooChartAdapter::new(YahooConfig::default())?),
    };

    let history = YahooChartAdapter::new(YahooConfig::default())?;
    let crypto = CoinGeckoAdapter::new(CoinGeckoConfig::default())?;
    let social = SocialApiAdapter::new(SocialApiConfig::new(config.social_bearer_token.clone()))?;
    let sink = HttpKpiSink::new(SinkConfig::new(config.kpi_push_url.clone()))?;

    let store = Arc::new(InMemoryOrderStore::new(config.order_store_capacity));
    let sales = SalesService::new(store);

    let defaults = DashboardDefaults {
        symbol: config.symbol.clone(),
        coin_id: config.coin_id.clone(),
        social_handle: config.social_handle.clone(),
        kpi_window_minutes: config.kpi_window_minutes,
        sales_window_hours: config.sales_window_hours,
        orders_per_refresh: config.orders_per_refresh,
        ..DashboardDefaults::default()
    };

    Ok(DashboardService::new(
        Arc::new(quotes),
        Arc::new(history),
        Arc::new(crypto),
        Arc::new(social),
        Arc::new(sink),
        sales,
        defaults,
    ))
}

/// Run refresh cycles on a fixed interval, caching the latest snapshot.
///
/// Everything runs on this one task, so ticks never overlap; a cycle
/// that outlasts the interval simply delays the next tick.
fn spawn_refresh_loop(
    service: Arc<EngineService>,
    latest: Arc<RwLock<Option<kpi_engine::DashboardSnapshot>>>,
    interval_secs: u64,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match service.refresh().await {
                Ok(snapshot) => {
                    tracing::debug!(
                        orders = snapshot.kpis.orders,
                        "refresh cycle complete"
                    );
                    *latest.write().await = Some(snapshot);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "refresh cycle failed");
                }
            }
        }
    });
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn log_config(config: &DashboardConfig) {
    tracing::info!(
        quote_source = config.quote_strategy.as_str(),
        symbol = %config.symbol,
        coin = %config.coin_id,
        social_handle = %config.social_handle,
        refresh_interval_secs = config.refresh_interval_secs,
        orders_per_refresh = config.orders_per_refresh,
        keyed_quotes = config.alphavantage_api_key.is_some(),
        social_enabled = config.social_bearer_token.is_some(),
        push_configured = config.kpi_push_url.is_some(),
        "configuration loaded"
    );
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
