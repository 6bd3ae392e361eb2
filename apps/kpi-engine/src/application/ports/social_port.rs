//! Social profile port (driven port).

use async_trait::async_trait;

use crate::domain::market::SocialProfile;

use super::source_error::SourceError;

/// Port for resolving a social handle to its opaque identifier.
///
/// Identifier resolution is the whole contract; no engagement metrics are
/// fetched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialSource: Send + Sync {
    /// Resolve `username` to a profile.
    async fn fetch_profile(&self, username: &str) -> Result<SocialProfile, SourceError>;
}
