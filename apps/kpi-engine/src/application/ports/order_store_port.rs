//! Order store port (driven port).
//!
//! The store is the only shared mutable resource in the system. It owns
//! id assignment and retention; the aggregator only queries it and must
//! tolerate an empty store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::orders::{NewOrder, Order};

/// Order store failures.
///
/// The in-memory store cannot fail, but file- or network-backed
/// implementations can.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Underlying storage failed.
    #[error("order store error: {message}")]
    Storage {
        /// Error details.
        message: String,
    },
}

/// Port for the append-only synthetic order log.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Append orders, assigning sequential ids. Returns the stored
    /// records in insertion order.
    async fn append(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>, StoreError>;

    /// All orders with `created_at >= cutoff`, chronologically ascending.
    async fn orders_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Order>, StoreError>;

    /// Number of orders currently retained.
    async fn count(&self) -> Result<u64, StoreError>;
}
