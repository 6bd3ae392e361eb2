//! CoinGecko adapter - unauthenticated crypto spot price.

mod adapter;

pub use adapter::{CoinGeckoAdapter, CoinGeckoConfig};
