//! Application layer - ports and orchestration services.

/// Port definitions (driven ports).
pub mod ports;

/// Services composing the ports into refresh and push operations.
pub mod services;
