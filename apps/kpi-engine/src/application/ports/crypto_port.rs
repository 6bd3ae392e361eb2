//! Crypto spot-price port (driven port).

use async_trait::async_trait;

use crate::domain::market::CryptoPrice;

use super::source_error::SourceError;

/// Port for a single unauthenticated spot-price lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CryptoSource: Send + Sync {
    /// Fetch the USD spot price for `coin_id`.
    ///
    /// An unknown coin id yields [`SourceError::EmptyData`], never a
    /// null-priced success.
    async fn fetch_spot_price(&self, coin_id: &str) -> Result<CryptoPrice, SourceError>;
}
