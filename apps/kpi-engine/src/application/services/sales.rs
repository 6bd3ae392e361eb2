//! Order simulator and windowed KPI aggregation.
//!
//! The simulator fabricates order rows when no real source exists; the
//! aggregation methods only query the store. An empty store is an
//! expected transient state and yields zeroed results, never an error.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::application::ports::{OrderStore, StoreError};
use crate::domain::orders::{KpiSnapshot, NewOrder, Order, SalesBucket, bucket_hourly};

/// Simulated amounts are sampled uniformly in cents over this range.
/// Kept in sync with the domain's amount bounds (asserted in tests).
const MIN_AMOUNT_CENTS: i64 = 500;
const MAX_AMOUNT_CENTS: i64 = 50_000;

/// Order simulation and sales KPI queries over an [`OrderStore`].
#[derive(Debug)]
pub struct SalesService<S> {
    store: Arc<S>,
}

impl<S> Clone for SalesService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> SalesService<S> {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Append `n` synthetic orders stamped with the current time.
    ///
    /// Amounts are sampled uniformly from the fixed plausible range. The
    /// service imposes no calling cadence; the refresh loop decides when
    /// to invoke this.
    pub async fn simulate_orders(&self, n: u32) -> Result<Vec<Order>, StoreError> {
        let now = Utc::now();
        let orders = {
            let mut rng = rand::rng();
            (0..n)
                .map(|_| {
                    let cents = rng.random_range(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS);
                    NewOrder::new(now, Decimal::new(cents, 2))
                })
                .collect()
        };

        let stored = self.store.append(orders).await?;
        tracing::debug!(count = stored.len(), "simulated orders appended");
        Ok(stored)
    }

    /// Sum, count, and mean of order amounts over the trailing window.
    ///
    /// A non-positive window or an empty store yields the zeroed
    /// snapshot.
    pub async fn windowed_kpis(&self, window_minutes: i64) -> Result<KpiSnapshot, StoreError> {
        if window_minutes <= 0 {
            return Ok(KpiSnapshot::zero());
        }
        let cutoff = Utc::now() - TimeDelta::minutes(window_minutes);
        let orders = self.store.orders_since(cutoff).await?;
        Ok(KpiSnapshot::from_orders(&orders))
    }

    /// Orders in the trailing window, chronologically ascending.
    pub async fn orders_in_window(&self, window_hours: i64) -> Result<Vec<Order>, StoreError> {
        if window_hours <= 0 {
            return Ok(Vec::new());
        }
        let cutoff = Utc::now() - TimeDelta::hours(window_hours);
        self.store.orders_since(cutoff).await
    }

    /// Hour-aligned sales totals over the trailing window, gaps
    /// zero-filled, for time-series display.
    pub async fn hourly_sales(&self, window_hours: i64) -> Result<Vec<SalesBucket>, StoreError> {
        if window_hours <= 0 {
            return Ok(Vec::new());
        }
        let now = Utc::now();
        let orders = self.store.orders_since(now - TimeDelta::hours(window_hours)).await?;
        Ok(bucket_hourly(&orders, window_hours, now))
    }
}
