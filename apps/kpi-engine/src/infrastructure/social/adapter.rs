//! Social profile adapter.
//!
//! Resolves a handle to its opaque numeric identifier and nothing more.
//! Engagement metrics would need further endpoints; this adapter stays
//! deliberately at identifier resolution.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{SocialSource, SourceError};
use crate::domain::market::SocialProfile;
use crate::infrastructure::config::ApiKey;

/// Default social API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Fixed per-call timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the social adapter.
#[derive(Debug, Clone)]
pub struct SocialApiConfig {
    /// Bearer token; `None` degrades every call to a configuration
    /// error.
    pub bearer_token: Option<ApiKey>,
    /// Endpoint base URL.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl SocialApiConfig {
    /// Create a configuration with the production endpoint.
    #[must_use]
    pub fn new(bearer_token: Option<ApiKey>) -> Self {
        Self {
            bearer_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }

    /// Override the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Bearer-authenticated profile lookup adapter.
#[derive(Debug, Clone)]
pub struct SocialApiAdapter {
    client: Client,
    config: SocialApiConfig,
}

impl SocialApiAdapter {
    /// Build the adapter. Construction succeeds without a token; the
    /// missing credential surfaces per call.
    pub fn new(config: SocialApiConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }
}

/// User lookup envelope.
#[derive(Debug, Deserialize)]
struct UserResponse {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
}

#[async_trait]
impl SocialSource for SocialApiAdapter {
    async fn fetch_profile(&self, username: &str) -> Result<SocialProfile, SourceError> {
        let Some(token) = &self.config.bearer_token else {
            return Err(SourceError::missing_credential("SOCIAL_BEARER_TOKEN"));
        };

        let url = format!("{}/2/users/by/username/{username}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| SourceError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: UserResponse =
            response.json().await.map_err(|e| SourceError::Upstream {
                status: status.as_u16(),
                message: format!("invalid user payload: {e}"),
            })?;

        let user = payload.data.ok_or_else(|| SourceError::EmptyData {
            message: format!("no user data for {username}"),
        })?;

        Ok(SocialProfile {
            username: username.to_string(),
            id: user.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_a_configuration_error() {
        let adapter = SocialApiAdapter::new(SocialApiConfig::new(None)).unwrap();
        let err = adapter.fetch_profile("twitter").await.unwrap_err();
        assert!(matches!(err, SourceError::Configuration { .. }));
        assert!(err.to_string().contains("SOCIAL_BEARER_TOKEN"));
    }

    #[test]
    fn user_payload_parsing() {
        let payload: UserResponse = serde_json::from_str(
            r#"{"data": {"id": "783214", "name": "X", "username": "twitter"}}"#,
        )
        .unwrap();
        assert_eq!(payload.data.unwrap().id, "783214");

        let missing: UserResponse =
            serde_json::from_str(r#"{"errors": [{"detail": "not found"}]}"#).unwrap();
        assert!(missing.data.is_none());
    }
}
