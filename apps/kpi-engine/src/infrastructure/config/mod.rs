//! Configuration loaded once from the environment.
//!
//! Adapters never read the environment themselves; everything they need
//! is passed in explicitly, so tests substitute values instead of
//! mutating process state.

mod settings;

pub use settings::{ApiKey, DashboardConfig, QuoteStrategy};
