//! HTTP/JSON API adapter.
//!
//! Inbound adapter exposing the latest dashboard snapshot, KPI queries,
//! and the manual push trigger to an external presentation layer.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
