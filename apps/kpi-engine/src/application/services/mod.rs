//! Application services - orchestration over the ports.

/// Order simulator and windowed sales aggregation.
pub mod sales;

/// One dashboard refresh cycle and the KPI push.
pub mod dashboard;

pub use dashboard::{DashboardDefaults, DashboardError, DashboardService, DashboardSnapshot};
pub use sales::SalesService;
