//! Ports - interfaces to every external collaborator.
//!
//! All ports are driven (secondary/outbound): upstream data sources, the
//! KPI sink, and the order store. Infrastructure provides the
//! implementations; services depend only on these traits.

mod crypto_port;
mod market_data_port;
mod order_store_port;
mod sink_port;
mod social_port;
mod source_error;

pub use crypto_port::CryptoSource;
pub use market_data_port::{HistorySource, QuoteSource};
pub use order_store_port::{OrderStore, StoreError};
pub use sink_port::{KpiSink, PushReceipt};
pub use social_port::SocialSource;
pub use source_error::SourceError;

#[cfg(test)]
pub use crypto_port::MockCryptoSource;
#[cfg(test)]
pub use market_data_port::{MockHistorySource, MockQuoteSource};
#[cfg(test)]
pub use social_port::MockSocialSource;
