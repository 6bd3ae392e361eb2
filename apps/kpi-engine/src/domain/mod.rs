//! Domain layer - Core data types and pure aggregation logic.
//!
//! Nothing in this layer performs I/O. Adapters construct these types at
//! the edges; services combine them.

/// Market data value types (quotes, history series, crypto, social).
pub mod market;

/// Synthetic orders and windowed sales KPIs.
pub mod orders;

pub use market::{CryptoPrice, HistorySeries, Quote, SocialProfile};
pub use orders::{KpiSnapshot, NewOrder, Order, SalesBucket, bucket_hourly};
