//! Error types for synapsed-hashing

use thiserror::Error;

/// Result type alias for hashing operations
pub type Result<T> = std::result::Result<T, HashingError>;

/// Errors raised while creating or verifying a password hash.
///
/// None of the messages carry the password or the full hash string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashingError {
    /// No algorithm is registered under the given id
    #[error("Unsupported hashing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The hash string does not follow the `$id$params$salt$digest` layout
    #[error("Invalid hash format: {0}")]
    InvalidFormat(String),

    /// A parameter or salt is outside what the algorithm accepts
    #[error("Invalid hashing parameter: {0}")]
    InvalidParameter(String),

    /// The underlying primitive rejected the input
    #[error("Hashing backend error: {0}")]
    Backend(String),
}

impl HashingError {
    /// True when the stored hash names an algorithm with no verifier
    pub fn is_unsupported_algorithm(&self) -> bool {
        matches!(self, HashingError::UnsupportedAlgorithm(_))
    }

    /// True when the hash string or its parameters could not be understood
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            HashingError::InvalidFormat(_) | HashingError::InvalidParameter(_)
        )
    }
}
