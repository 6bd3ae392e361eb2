//! KPI push sink adapter.

mod adapter;

pub use adapter::{HttpKpiSink, SinkConfig};
