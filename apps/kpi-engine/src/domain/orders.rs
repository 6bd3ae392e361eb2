//! Synthetic orders and windowed sales aggregation.
//!
//! Orders are append-only: created by the simulator, never mutated or
//! deleted. All aggregation here is pure - the store is queried elsewhere
//! and slices of orders are summarized by these functions.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Smallest simulated order amount.
pub const MIN_ORDER_AMOUNT: Decimal = dec!(5.00);

/// Largest simulated order amount.
pub const MAX_ORDER_AMOUNT: Decimal = dec!(500.00);

/// A synthetic order as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned sequential identifier.
    pub id: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Order amount.
    pub amount: Decimal,
}

/// An order before the store has assigned its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Order amount.
    pub amount: Decimal,
}

impl NewOrder {
    /// Create a new order record.
    #[must_use]
    pub const fn new(created_at: DateTime<Utc>, amount: Decimal) -> Self {
        Self { created_at, amount }
    }

    /// Attach a store-assigned id.
    #[must_use]
    pub const fn with_id(self, id: i64) -> Order {
        Order {
            id,
            created_at: self.created_at,
            amount: self.amount,
        }
    }
}

/// Windowed sales summary. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Sum of order amounts in the window.
    pub total_sales: Decimal,
    /// Number of orders in the window.
    pub orders: u64,
    /// Mean order amount, rounded to cents. Zero for an empty window.
    pub avg_order_value: Decimal,
}

impl KpiSnapshot {
    /// The all-zero snapshot for an empty window.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_sales: Decimal::ZERO,
            orders: 0,
            avg_order_value: Decimal::ZERO,
        }
    }

    /// Summarize a slice of orders.
    ///
    /// The mean is zero when the slice is empty; there is no division by
    /// zero path.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        if orders.is_empty() {
            return Self::zero();
        }
        let total: Decimal = orders.iter().map(|o| o.amount).sum();
        let count = orders.len() as u64;
        Self {
            total_sales: total,
            orders: count,
            avg_order_value: (total / Decimal::from(count)).round_dp(2),
        }
    }
}

/// One hour-aligned bucket of summed sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBucket {
    /// Start of the hour this bucket covers.
    pub bucket_start: DateTime<Utc>,
    /// Sum of order amounts created within the hour.
    pub total: Decimal,
}

/// Bucket orders into hour-aligned sums over the trailing window.
///
/// Buckets run from the hour containing `now - window_hours` through the
/// hour containing `now`, with empty hours present as zero totals. Orders
/// outside the window are ignored. A non-positive window yields no
/// buckets.
#[must_use]
pub fn bucket_hourly(orders: &[Order], window_hours: i64, now: DateTime<Utc>) -> Vec<SalesBucket> {
    if window_hours <= 0 {
        return Vec::new();
    }

    let first = floor_to_hour(now - TimeDelta::hours(window_hours));
    let last = floor_to_hour(now);
    let bucket_count = ((last - first).num_hours() + 1) as usize;

    let mut buckets: Vec<SalesBucket> = (0..bucket_count)
        .map(|i| SalesBucket {
            bucket_start: first + TimeDelta::hours(i as i64),
            total: Decimal::ZERO,
        })
        .collect();

    for order in orders {
        if order.created_at < first || order.created_at > now {
            continue;
        }
        let idx = ((floor_to_hour(order.created_at) - first).num_hours()) as usize;
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.total += order.amount;
        }
    }

    buckets
}

fn floor_to_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    let floored = secs - secs.rem_euclid(3600);
    DateTime::<Utc>::from_timestamp(floored, 0).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn order(id: i64, secs: i64, amount: Decimal) -> Order {
        Order {
            id,
            created_at: ts(secs),
            amount,
        }
    }

    #[test]
    fn snapshot_of_empty_slice_is_zero() {
        let snapshot = KpiSnapshot::from_orders(&[]);
        assert_eq!(snapshot, KpiSnapshot::zero());
        assert_eq!(snapshot.avg_order_value, Decimal::ZERO);
    }

    #[test]
    fn snapshot_sum_count_mean() {
        let orders = vec![
            order(1, 0, dec!(10.00)),
            order(2, 1, dec!(20.00)),
            order(3, 2, dec!(40.00)),
        ];
        let snapshot = KpiSnapshot::from_orders(&orders);
        assert_eq!(snapshot.total_sales, dec!(70.00));
        assert_eq!(snapshot.orders, 3);
        assert_eq!(snapshot.avg_order_value, dec!(23.33));
    }

    #[test]
    fn snapshot_single_order() {
        let orders = vec![order(1, 0, dec!(99.99))];
        let snapshot = KpiSnapshot::from_orders(&orders);
        assert_eq!(snapshot.total_sales, dec!(99.99));
        assert_eq!(snapshot.orders, 1);
        assert_eq!(snapshot.avg_order_value, dec!(99.99));
    }

    #[test]
    fn new_order_with_id() {
        let new_order = NewOrder::new(ts(100), dec!(12.50));
        let stored = new_order.with_id(7);
        assert_eq!(stored.id, 7);
        assert_eq!(stored.created_at, ts(100));
        assert_eq!(stored.amount, dec!(12.50));
    }

    #[test]
    fn bucket_hourly_zero_fills_gaps() {
        // now = 3h + 30m after epoch; orders in hour 0 and hour 3 only.
        let now = ts(3 * 3600 + 1800);
        let orders = vec![
            order(1, 600, dec!(10.00)),
            order(2, 900, dec!(5.00)),
            order(3, 3 * 3600 + 60, dec!(20.00)),
        ];

        let buckets = bucket_hourly(&orders, 3, now);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].bucket_start, ts(0));
        assert_eq!(buckets[0].total, dec!(15.00));
        assert_eq!(buckets[1].total, Decimal::ZERO);
        assert_eq!(buckets[2].total, Decimal::ZERO);
        assert_eq!(buckets[3].total, dec!(20.00));
    }

    #[test]
    fn bucket_hourly_ignores_orders_outside_window() {
        let now = ts(10 * 3600);
        let orders = vec![
            order(1, 0, dec!(10.00)),          // 10h old, outside 2h window
            order(2, 9 * 3600 + 60, dec!(7.00)),
        ];

        let buckets = bucket_hourly(&orders, 2, now);
        let total: Decimal = buckets.iter().map(|b| b.total).sum();
        assert_eq!(total, dec!(7.00));
    }

    #[test]
    fn bucket_hourly_non_positive_window_is_empty() {
        assert!(bucket_hourly(&[], 0, ts(0)).is_empty());
        assert!(bucket_hourly(&[], -5, ts(0)).is_empty());
    }

    #[test]
    fn bucket_starts_are_hour_aligned_and_ascending() {
        let now = ts(100 * 3600 + 123);
        let buckets = bucket_hourly(&[], 24, now);
        assert_eq!(buckets.len(), 25);
        for pair in buckets.windows(2) {
            assert_eq!(pair[1].bucket_start - pair[0].bucket_start, TimeDelta::hours(1));
            assert_eq!(pair[0].bucket_start.timestamp() % 3600, 0);
        }
    }

    #[test]
    fn amount_range_is_plausible() {
        assert!(MIN_ORDER_AMOUNT < MAX_ORDER_AMOUNT);
        assert!(MIN_ORDER_AMOUNT > Decimal::ZERO);
    }
}
