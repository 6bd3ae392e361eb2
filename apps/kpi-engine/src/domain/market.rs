//! Market data value types.
//!
//! Each type is produced fresh by an adapter on every call and carries no
//! identity beyond its fields. Prices are `Decimal`; conversion from
//! upstream floats or strings happens at the adapter boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single current quote for an equity symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol (e.g. "AAPL").
    pub symbol: String,
    /// Last known price.
    pub price: Decimal,
    /// Absolute change versus the previous reference price.
    pub change: Decimal,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
}

/// A spot price for a cryptocurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoPrice {
    /// Upstream coin identifier (e.g. "bitcoin").
    pub coin_id: String,
    /// Spot price in USD.
    pub price: Decimal,
    /// When the price was produced.
    pub timestamp: DateTime<Utc>,
}

/// A resolved social profile.
///
/// Deliberately partial: only the opaque numeric identifier is resolved,
/// no engagement metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Handle the lookup was performed for.
    pub username: String,
    /// Opaque upstream identifier.
    pub id: String,
}

/// A time series of closing prices for one symbol.
///
/// `timestamps` and `prices` always have the same length; the only way to
/// build a series is through [`HistorySeries::from_points`], which pairs
/// them element-wise. Chronological ordering is inherited from the
/// upstream source and not independently enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    /// Ticker symbol.
    pub symbol: String,
    /// Observation timestamps.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Closing prices, parallel to `timestamps`.
    pub prices: Vec<Decimal>,
}

impl HistorySeries {
    /// Build a series from already-paired points.
    ///
    /// Adapters drop entries with missing closes before calling this, so
    /// the parallel sequences cannot desynchronize.
    pub fn from_points(
        symbol: impl Into<String>,
        points: impl IntoIterator<Item = (DateTime<Utc>, Decimal)>,
    ) -> Self {
        let (timestamps, prices) = points.into_iter().unzip();
        Self {
            symbol: symbol.into(),
            timestamps,
            prices,
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The most recent close, if any.
    #[must_use]
    pub fn last_close(&self) -> Option<Decimal> {
        self.prices.last().copied()
    }

    /// Change between the two most recent closes, rounded to 4 decimal
    /// places. Zero when fewer than two closes exist.
    #[must_use]
    pub fn latest_change(&self) -> Decimal {
        match self.prices.as_slice() {
            [.., prev, last] => (*last - *prev).round_dp(4),
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn from_points_keeps_sequences_parallel() {
        let series = HistorySeries::from_points(
            "AAPL",
            vec![(ts(0), dec!(100)), (ts(60), dec!(101)), (ts(120), dec!(99.5))],
        );

        assert_eq!(series.timestamps.len(), series.prices.len());
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }

    #[test]
    fn empty_series() {
        let series = HistorySeries::from_points("AAPL", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last_close(), None);
        assert_eq!(series.latest_change(), Decimal::ZERO);
    }

    #[test]
    fn latest_change_from_last_two_closes() {
        let series = HistorySeries::from_points(
            "AAPL",
            vec![(ts(0), dec!(100)), (ts(60), dec!(101.2345678))],
        );
        assert_eq!(series.latest_change(), dec!(1.2346));
    }

    #[test]
    fn latest_change_single_close_is_zero() {
        let series = HistorySeries::from_points("AAPL", vec![(ts(0), dec!(100))]);
        assert_eq!(series.latest_change(), Decimal::ZERO);
        assert_eq!(series.last_close(), Some(dec!(100)));
    }

    #[test]
    fn quote_serializes_iso8601_timestamp() {
        let quote = Quote {
            symbol: "AAPL".to_string(),
            price: dec!(187.31),
            change: dec!(-0.42),
            timestamp: ts(1_700_000_000),
        };

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert!(json["timestamp"].as_str().unwrap().starts_with("2023-11-14T"));
    }
}
