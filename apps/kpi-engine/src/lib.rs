// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! KPI Engine - Dashboard Backend Library
//!
//! Data-refresh and aggregation backend for a live KPI dashboard. Every
//! external data source sits behind a thin adapter that normalizes its
//! result into one uniform success-or-error shape; an in-process
//! simulator fabricates order rows and a windowed aggregator summarizes
//! them; aggregated KPIs can be pushed one-shot to an HTTP sink.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Value types and pure aggregation math
//!   - `market`: Quote, HistorySeries, CryptoPrice, SocialProfile
//!   - `orders`: Order, KpiSnapshot, hourly bucketing
//!
//! - **Application**: Ports and orchestration
//!   - `ports`: `QuoteSource`, `HistorySource`, `CryptoSource`,
//!     `SocialSource`, `KpiSink`, `OrderStore`, and the shared
//!     `SourceError` taxonomy
//!   - `services`: `SalesService` (simulator + aggregator),
//!     `DashboardService` (one refresh cycle, KPI push)
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `alphavantage` / `yahoo`: interchangeable quote strategies
//!   - `coingecko`, `social`, `sink`: remaining outbound adapters
//!   - `persistence`: bounded in-memory order store
//!   - `http`: inbound JSON API for the presentation layer
//!   - `config`: environment-derived configuration object
//!
//! # Error handling
//!
//! All adapter failures - missing configuration, transport, upstream
//! status, unusable payload - normalize to [`SourceError`] at the port
//! boundary. The aggregator treats an empty store as a valid zero-valued
//! result, never an error. No failure is fatal to a refresh cycle.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core value types and pure aggregation.
pub mod domain;

/// Application layer - Ports and services.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::market::{CryptoPrice, HistorySeries, Quote, SocialProfile};
pub use domain::orders::{KpiSnapshot, NewOrder, Order, SalesBucket};

// Application re-exports
pub use application::ports::{
    CryptoSource, HistorySource, KpiSink, OrderStore, PushReceipt, QuoteSource, SocialSource,
    SourceError, StoreError,
};
pub use application::services::{
    DashboardDefaults, DashboardError, DashboardService, DashboardSnapshot, SalesService,
};

// Infrastructure re-exports
pub use infrastructure::alphavantage::{AlphaVantageConfig, AlphaVantageQuoteAdapter};
pub use infrastructure::coingecko::{CoinGeckoAdapter, CoinGeckoConfig};
pub use infrastructure::config::{ApiKey, DashboardConfig, QuoteStrategy};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::InMemoryOrderStore;
pub use infrastructure::sink::{HttpKpiSink, SinkConfig};
pub use infrastructure::social::{SocialApiAdapter, SocialApiConfig};
pub use infrastructure::yahoo::{YahooChartAdapter, YahooConfig};
