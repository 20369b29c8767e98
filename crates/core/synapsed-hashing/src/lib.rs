//! # Synapsed Hashing
//!
//! Password hash creation and verification behind an explicitly constructed
//! strategy object.
//!
//! Hashes are self-describing strings (`$id$params$salt$digest`), so a stored
//! hash can always be checked by the algorithm that produced it, whatever the
//! current default is.
//!
//! ```rust
//! use synapsed_hashing::HashingStrategy;
//!
//! let strategy = HashingStrategy::default();
//! let hash = strategy.hash("sha512", None, "somesalt", "sausages").unwrap();
//!
//! assert!(strategy.verify(&hash, "sausages").unwrap());
//! assert!(!strategy.verify(&hash, "eggs").unwrap());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

/// Algorithm adapters and the algorithm trait
pub mod algorithms;

/// Error types
pub mod error;

/// Hash string encoding
pub mod hash_string;

/// The hashing strategy
pub mod strategy;

pub use algorithms::HashingAlgorithm;
pub use error::{HashingError, Result};
pub use hash_string::{HashParams, HashString};
pub use strategy::{HashingStrategy, DEFAULT_ALGORITHM, DEFAULT_SALT_LENGTH};
