//! HTTP response DTOs.
//!
//! Every source tile serializes to the uniform tagged-union contract: a
//! success payload, or `{"error": "..."}`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::SourceError;
use crate::application::services::DashboardSnapshot;
use crate::domain::market::{CryptoPrice, HistorySeries, Quote, SocialProfile};
use crate::domain::orders::{KpiSnapshot, SalesBucket};

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// A dashboard tile: either the source payload or an inline error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TileResponse<T> {
    /// Successful source payload.
    Data(T),
    /// Inline error, rendered as a warning by the presentation layer.
    Error {
        /// The normalized error message.
        error: String,
    },
}

impl<T: Clone> TileResponse<T> {
    /// Build a tile from an adapter result.
    pub fn from_result(result: &Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Self::Data(value.clone()),
            Err(err) => Self::Error {
                error: err.to_string(),
            },
        }
    }
}

/// The full dashboard snapshot as served to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// When the underlying refresh cycle ran.
    pub generated_at: DateTime<Utc>,
    /// Windowed sales KPIs.
    pub kpis: KpiSnapshot,
    /// Hourly sales totals for the chart.
    pub hourly_sales: Vec<SalesBucket>,
    /// Equity quote tile.
    pub quote: TileResponse<Quote>,
    /// Equity history tile.
    pub history: TileResponse<HistorySeries>,
    /// Crypto tile.
    pub crypto: TileResponse<CryptoPrice>,
    /// Social tile.
    pub social: TileResponse<SocialProfile>,
}

impl From<&DashboardSnapshot> for DashboardResponse {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        Self {
            generated_at: snapshot.generated_at,
            kpis: snapshot.kpis.clone(),
            hourly_sales: snapshot.hourly_sales.clone(),
            quote: TileResponse::from_result(&snapshot.quote),
            history: TileResponse::from_result(&snapshot.history),
            crypto: TileResponse::from_result(&snapshot.crypto),
            social: TileResponse::from_result(&snapshot.social),
        }
    }
}

/// Uniform inline error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// The normalized error message.
    pub error: String,
}

impl ErrorResponse {
    /// Build from anything displayable.
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tile_serializes_success_payload() {
        let result: Result<Quote, SourceError> = Ok(Quote {
            symbol: "AAPL".to_string(),
            price: dec!(187.31),
            change: dec!(-0.42),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_value(TileResponse::from_result(&result)).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn tile_serializes_error_shape() {
        let result: Result<Quote, SourceError> = Err(SourceError::Upstream {
            status: 500,
            message: "Internal Server Error".to_string(),
        });

        let json = serde_json::to_value(TileResponse::from_result(&result)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "upstream error (500): Internal Server Error"})
        );
    }
}
