//! HTTP controller (driver adapter).
//!
//! Axum routes delegating to the dashboard service. The dashboard
//! endpoint serves the snapshot cached by the refresh loop; KPI and
//! sales queries hit the store directly.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use tokio::sync::RwLock;

use crate::application::ports::{
    CryptoSource, HistorySource, KpiSink, OrderStore, QuoteSource, SocialSource,
};
use crate::application::services::{DashboardService, DashboardSnapshot};

use super::request::{KpiWindowQuery, PushRequest, SalesWindowQuery};
use super::response::{DashboardResponse, ErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<Q, H, C, X, K, S>
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    /// The dashboard service.
    pub service: Arc<DashboardService<Q, H, C, X, K, S>>,
    /// Snapshot cached by the refresh loop.
    pub latest: Arc<RwLock<Option<DashboardSnapshot>>>,
    /// Application version.
    pub version: String,
}

impl<Q, H, C, X, K, S> Clone for AppState<Q, H, C, X, K, S>
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            latest: Arc::clone(&self.latest),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<Q, H, C, X, K, S>(state: AppState<Q, H, C, X, K, S>) -> Router
where
    Q: QuoteSource + 'static,
    H: HistorySource + 'static,
    C: CryptoSource + 'static,
    X: SocialSource + 'static,
    K: KpiSink + 'static,
    S: OrderStore + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/dashboard", get(dashboard))
        .route("/api/v1/kpis", get(kpis))
        .route("/api/v1/sales", get(sales))
        .route("/api/v1/push", post(push))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<Q, H, C, X, K, S>(
    State(state): State<AppState<Q, H, C, X, K, S>>,
) -> impl IntoResponse
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Latest cached dashboard snapshot.
async fn dashboard<Q, H, C, X, K, S>(
    State(state): State<AppState<Q, H, C, X, K, S>>,
) -> impl IntoResponse
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    let latest = state.latest.read().await;
    match latest.as_ref() {
        Some(snapshot) => Json(DashboardResponse::from(snapshot)).into_response(),
        None => Json(ErrorResponse::new("no refresh cycle has completed yet")).into_response(),
    }
}

/// Windowed KPI query.
async fn kpis<Q, H, C, X, K, S>(
    State(state): State<AppState<Q, H, C, X, K, S>>,
    Query(query): Query<KpiWindowQuery>,
) -> impl IntoResponse
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    match state.service.sales().windowed_kpis(query.window_minutes).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => Json(ErrorResponse::new(err)).into_response(),
    }
}

/// Hourly sales series query.
async fn sales<Q, H, C, X, K, S>(
    State(state): State<AppState<Q, H, C, X, K, S>>,
    Query(query): Query<SalesWindowQuery>,
) -> impl IntoResponse
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    match state.service.sales().hourly_sales(query.window_hours).await {
        Ok(buckets) => Json(buckets).into_response(),
        Err(err) => Json(ErrorResponse::new(err)).into_response(),
    }
}

/// Manual push trigger. The body is optional; an empty body pushes to
/// the configured default destination.
async fn push<Q, H, C, X, K, S>(
    State(state): State<AppState<Q, H, C, X, K, S>>,
    body: Bytes,
) -> impl IntoResponse
where
    Q: QuoteSource,
    H: HistorySource,
    C: CryptoSource,
    X: SocialSource,
    K: KpiSink,
    S: OrderStore,
{
    let request = if body.is_empty() {
        PushRequest::default()
    } else {
        match serde_json::from_slice::<PushRequest>(&body) {
            Ok(request) => request,
            Err(err) => {
                return Json(ErrorResponse::new(format!("invalid push request: {err}")))
                    .into_response();
            }
        }
    };

    match state.service.push_kpis(request.destination.as_deref()).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => Json(ErrorResponse::new(err)).into_response(),
    }
}
