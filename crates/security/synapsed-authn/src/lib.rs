//! # Synapsed Authn
//!
//! Identifier/secret authentication against records held in a document
//! store.
//!
//! ## Features
//!
//! - **Lookup**: configurable record fields and collection, pluggable filter construction
//! - **Verification**: stored hashes checked through an injected [`HashingStrategy`]
//! - **Principals**: the matched record's fields plus an `amr` method reference
//! - **Authorization**: roles and permissions read from the same records
//! - **Configuration**: field mapping and hashing settings from files and the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use synapsed_authn::{
//!     AuthenticationEngine, AuthenticationProvider, Credentials, HashingStrategy,
//!     MemoryCredentialStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hashing = Arc::new(HashingStrategy::default());
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let hash = hashing.hash("sha512", None, "somesalt", "sausages")?;
//!     store.insert("user", json!({"username": "tim", "password": hash}))?;
//!
//!     let engine = AuthenticationEngine::builder(store, hashing).build();
//!     let principal = engine
//!         .authenticate(Credentials::password("tim", "sausages"))
//!         .await?;
//!
//!     assert_eq!(principal.auth_methods(), ["pwd"]);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

/// Authentication providers
pub mod auth;

/// Role and permission lookup
pub mod authorization;

/// Field mapping and configuration loading
pub mod config;

/// Credential kinds
pub mod credentials;

/// Error types for the library
pub mod error;

/// Authenticated principals
pub mod principal;

/// Store filter construction
pub mod query;

/// Credential store traits and backends
pub mod storage;

/// Tracing setup
pub mod telemetry;

/// A stored record or store filter: field name to JSON value
pub type Document = serde_json::Map<String, serde_json::Value>;

pub use auth::{AuthenticationEngine, AuthenticationProvider, EngineBuilder};
pub use authorization::{
    AuthorizationOptions, AuthorizationOptionsBuilder, AuthorizationProvider, Authorizations,
    RecordAuthorization,
};
pub use config::{AuthnConfig, FieldMapping, FieldMappingBuilder, HashingConfig};
pub use credentials::{Credentials, PasswordCredentials, TokenCredentials};
pub use error::{Error, ErrorKind, Result, StoreError};
pub use principal::{Principal, AMR_KEY, AMR_PASSWORD};
pub use query::{DefaultQueryBuilder, QueryBuilder, ScopedQueryBuilder};
pub use storage::{CredentialStore, MemoryCredentialStore, MemoryStoreError};

pub use synapsed_hashing::{HashParams, HashingError, HashingStrategy};
