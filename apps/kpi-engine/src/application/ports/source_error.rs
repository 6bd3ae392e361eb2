//! Uniform error shape shared by every source adapter and the sink.

use thiserror::Error;

/// The single failure taxonomy every adapter normalizes into.
///
/// No failure propagates past an adapter's public contract in any other
/// shape. The presentation layer renders these inline; none is fatal to a
/// refresh cycle.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// A required credential or destination is missing. Detected before
    /// any network attempt.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was missing.
        message: String,
    },

    /// Network failure or timeout.
    #[error("transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// Upstream returned a non-success status or an unparseable payload.
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response detail.
        message: String,
    },

    /// Upstream answered successfully but the payload is unusable.
    #[error("no data: {message}")]
    EmptyData {
        /// What was missing from the payload.
        message: String,
    },
}

impl SourceError {
    /// Missing-credential configuration error.
    #[must_use]
    pub fn missing_credential(name: &str) -> Self {
        Self::Configuration {
            message: format!("missing {name}"),
        }
    }

    /// Transport error from any connection or timeout failure.
    #[must_use]
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}
