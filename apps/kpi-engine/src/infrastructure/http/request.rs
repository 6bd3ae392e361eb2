//! HTTP request DTOs.

use serde::Deserialize;

/// Body of the manual push trigger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushRequest {
    /// Override destination; falls back to the configured default.
    pub destination: Option<String>,
}

/// Query parameters for the KPI endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct KpiWindowQuery {
    /// Trailing window in minutes.
    #[serde(default = "default_kpi_window")]
    pub window_minutes: i64,
}

impl Default for KpiWindowQuery {
    fn default() -> Self {
        Self {
            window_minutes: default_kpi_window(),
        }
    }
}

const fn default_kpi_window() -> i64 {
    60
}

/// Query parameters for the sales-series endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SalesWindowQuery {
    /// Trailing window in hours.
    #[serde(default = "default_sales_window")]
    pub window_hours: i64,
}

impl Default for SalesWindowQuery {
    fn default() -> Self {
        Self {
            window_hours: default_sales_window(),
        }
    }
}

const fn default_sales_window() -> i64 {
    24
}
