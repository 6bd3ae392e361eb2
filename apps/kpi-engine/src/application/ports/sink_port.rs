//! KPI sink port (driven port).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::source_error::SourceError;

/// Acknowledgement of a successful push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReceipt {
    /// Always "ok" on success.
    pub status: String,
    /// HTTP status code returned by the sink.
    pub code: u16,
}

impl PushReceipt {
    /// Receipt for a successful push with the given status code.
    #[must_use]
    pub fn ok(code: u16) -> Self {
        Self {
            status: "ok".to_string(),
            code,
        }
    }
}

/// Port for posting an arbitrary JSON payload to a streaming sink.
///
/// Destination resolution order: the explicit argument, else the
/// implementation's configured default. Neither present fails with
/// [`SourceError::Configuration`] before any network call. One POST
/// attempt, no retries.
#[async_trait]
pub trait KpiSink: Send + Sync {
    /// Push `payload` to `destination` or the configured default.
    async fn push(
        &self,
        payload: &serde_json::Value,
        destination: Option<&str>,
    ) -> Result<PushReceipt, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_serializes_contract_shape() {
        let receipt = PushReceipt::ok(202);
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok", "code": 202}));
    }
}
