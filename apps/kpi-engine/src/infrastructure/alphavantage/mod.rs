//! Alpha Vantage adapter - keyed single-quote lookup.

mod adapter;
mod api_types;

pub use adapter::{AlphaVantageConfig, AlphaVantageQuoteAdapter};
