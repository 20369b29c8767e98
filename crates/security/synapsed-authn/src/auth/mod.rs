//! Authentication providers

use crate::{Credentials, Principal, Result};
use async_trait::async_trait;

/// Authentication against document-store records
pub mod engine;

pub use engine::{AuthenticationEngine, EngineBuilder};

/// Core trait for authentication mechanisms
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Authenticate with the provided credentials
    async fn authenticate(&self, credentials: Credentials) -> Result<Principal>;
}
