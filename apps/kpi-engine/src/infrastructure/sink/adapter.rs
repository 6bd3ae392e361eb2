//! HTTP sink adapter for one-shot KPI pushes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{KpiSink, PushReceipt, SourceError};

/// Fixed per-call timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP sink.
#[derive(Debug, Clone, Default)]
pub struct SinkConfig {
    /// Default destination used when the caller supplies none.
    pub default_url: Option<String>,
}

impl SinkConfig {
    /// Create a configuration with the given default destination.
    #[must_use]
    pub const fn new(default_url: Option<String>) -> Self {
        Self { default_url }
    }
}

/// Posts a JSON payload to a configured or per-call destination.
///
/// One POST attempt; transport failures and non-success statuses surface
/// as distinct error classes.
#[derive(Debug, Clone)]
pub struct HttpKpiSink {
    client: Client,
    config: SinkConfig,
}

impl HttpKpiSink {
    /// Build the sink. Construction succeeds without a default
    /// destination; the missing configuration surfaces per call.
    pub fn new(config: SinkConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl KpiSink for HttpKpiSink {
    async fn push(
        &self,
        payload: &serde_json::Value,
        destination: Option<&str>,
    ) -> Result<PushReceipt, SourceError> {
        let Some(url) = destination.or(self.config.default_url.as_deref()) else {
            return Err(SourceError::Configuration {
                message: "missing push destination: no argument and no KPI_PUSH_URL".to_string(),
            });
        };

        let response = self
            .client
            .post(url)
            .json(payload)
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

        Ok(PushReceipt::ok(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_destination_and_no_default_is_a_configuration_error() {
        let sink = HttpKpiSink::new(SinkConfig::default()).unwrap();
        let err = sink
            .push(&serde_json::json!([{"orders": 1}]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Configuration { .. }));
    }

    #[test]
    fn sink_construction() {
        assert!(HttpKpiSink::new(SinkConfig::new(Some("http://localhost:1".to_string()))).is_ok());
    }
}
