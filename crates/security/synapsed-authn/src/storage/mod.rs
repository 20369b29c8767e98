//! Storage module for identity record lookups
//!
//! Provides:
//! - The credential store trait
//! - An in-memory store

pub mod memory;
pub mod traits;

pub use memory::{MemoryCredentialStore, MemoryStoreError};
pub use traits::CredentialStore;
