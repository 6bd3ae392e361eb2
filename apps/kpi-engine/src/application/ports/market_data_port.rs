//! Quote and history ports (driven ports).
//!
//! Two interchangeable quote strategies exist: the keyed single-quote
//! lookup and the keyless chart lookup that derives change from the last
//! two minute-closes. Both implement [`QuoteSource`]; the caller picks.

use async_trait::async_trait;

use crate::domain::market::{HistorySeries, Quote};

use super::source_error::SourceError;

/// Port for fetching a single current quote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current quote for `symbol`.
    ///
    /// Symbol syntax is not validated here; an invalid symbol is forwarded
    /// upstream and the resulting failure surfaces as a [`SourceError`].
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, SourceError>;
}

/// Port for fetching a closing-price time series.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch a series for `symbol`.
    ///
    /// `period` and `interval` are opaque strings in the upstream source's
    /// own windowing syntax (e.g. "7d" of "1h" bars); invalid combinations
    /// surface as upstream errors or empty results.
    async fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<HistorySeries, SourceError>;
}
