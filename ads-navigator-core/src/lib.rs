//! Ads Navigator Core Library
//!
//! Navigation engine over Google Ads accounts:
//! - account tree resolution (manager → client → campaigns)
//! - breadcrumb navigation stack
//! - campaign listing with search filter and pagination
//! - view projection into a render model
//! - per-session controller guarding against stale responses
//!
//! The Ads API backend and the credential source are injected through
//! [`ServiceContext`], so the engine does not depend on any platform layer.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{CredentialProvider, InMemoryCredentialProvider};
