//! Social profile adapter - bearer-authenticated identifier lookup.

mod adapter;

pub use adapter::{SocialApiAdapter, SocialApiConfig};
