//! Bounded in-memory order store.

use std::collections::VecDeque;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{OrderStore, StoreError};
use crate::domain::orders::{NewOrder, Order};

/// In-memory implementation of [`OrderStore`].
///
/// Append-only under a single write lock; ids are assigned from a
/// monotonic counter. Retention is bounded: once `capacity` is reached,
/// the oldest orders are evicted ring-buffer style so the log cannot
/// grow without bound.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    orders: RwLock<VecDeque<Order>>,
    next_id: AtomicI64,
    capacity: usize,
}

impl InMemoryOrderStore {
    /// Create an empty store retaining at most `capacity` orders.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            orders: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            next_id: AtomicI64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Number of retained orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    /// Whether the store holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().unwrap().is_empty()
    }

    /// Remove all orders (for test setup).
    pub fn clear(&self) {
        self.orders.write().unwrap().clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn append(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>, StoreError> {
        let mut stored = Vec::with_capacity(orders.len());
        let mut log = self.orders.write().unwrap();
        for new_order in orders {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let order = new_order.with_id(id);
            if log.len() == self.capacity {
                log.pop_front();
            }
            log.push_back(order.clone());
            stored.push(order);
        }
        Ok(stored)
    }

    async fn orders_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Order>, StoreError> {
        let log = self.orders.read().unwrap();
        Ok(log
            .iter()
            .filter(|o| o.created_at >= cutoff)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.orders.read().unwrap().len() as u64)
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

    fn new_order(secs: i64) -> NewOrder {
        NewOrder::new(ts(secs), dec!(10.00))
    }

    #[tokio::test]
    async fn append_assigns_sequential_ids() {
        let store = InMemoryOrderStore::new(100);
        let stored = store
            .append(vec![new_order(0), new_order(1), new_order(2)])
            .await
            .unwrap();

        assert_eq!(stored.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let more = store.append(vec![new_order(3)]).await.unwrap();
        assert_eq!(more[0].id, 4);
    }

    #[tokio::test]
    async fn orders_since_filters_and_preserves_order() {
        let store = InMemoryOrderStore::new(100);
        store
            .append(vec![new_order(100), new_order(200), new_order(300)])
            .await
            .unwrap();

        let recent = store.orders_since(ts(200)).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].created_at, ts(200));
        assert_eq!(recent[1].created_at, ts(300));
    }

    #[tokio::test]
    async fn orders_since_on_empty_store_is_empty() {
        let store = InMemoryOrderStore::new(100);
        assert!(store.orders_since(ts(0)).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn capacity_bound_evicts_oldest() {
        let store = InMemoryOrderStore::new(3);
        store
            .append(vec![
                new_order(0),
                new_order(1),
                new_order(2),
                new_order(3),
                new_order(4),
            ])
            .await
            .unwrap();

        assert_eq!(store.len(), 3);
        let kept = store.orders_since(ts(0)).await.unwrap();
        assert_eq!(kept.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn eviction_does_not_reset_ids() {
        let store = InMemoryOrderStore::new(2);
        store.append(vec![new_order(0), new_order(1)]).await.unwrap();
        store.append(vec![new_order(2)]).await.unwrap();

        let stored = store.append(vec![new_order(3)]).await.unwrap();
        assert_eq!(stored[0].id, 4);
    }

    #[tokio::test]
    async fn len_and_clear() {
        let store = InMemoryOrderStore::new(10);
        assert!(store.is_empty());

        store.append(vec![new_order(0)]).await.unwrap();
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }
}
