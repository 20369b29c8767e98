//! Error types for synapsed-authn

use synapsed_hashing::HashingError;
use thiserror::Error;

/// Result type alias for synapsed-authn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a credential store
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for synapsed-authn
///
/// Messages may name the identifier but never include the secret or the
/// stored hash.
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials or stored data are structurally unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The credentials variant is not handled by this authenticator
    #[error("Unsupported credential type: {0}")]
    UnsupportedCredentialType(String),

    /// No record matched the identifier
    #[error("No account found for user [{identifier}]")]
    NotFound {
        /// Identifier that was looked up
        identifier: String,
    },

    /// More than one record matched the identifier
    #[error("More than one user row found for user [{identifier}] ({count}); identifiers must be unique")]
    AmbiguousRecord {
        /// Identifier that was looked up
        identifier: String,
        /// Number of matching records
        count: usize,
    },

    /// Exactly one record matched but the secret did not verify
    #[error("Invalid username/password [{identifier}]")]
    InvalidCredentials {
        /// Identifier that was looked up
        identifier: String,
    },

    /// The stored hash names an algorithm with no registered verifier
    #[error("Unsupported hashing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The credential store failed; the original error is kept as the source
    #[error("Credential store failure: {0}")]
    StoreFailure(#[source] StoreError),

    /// Hash creation failed
    #[error("Hashing error: {0}")]
    Hashing(#[source] HashingError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The kind of an [`Error`], for audit logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidInput`]
    InvalidInput,
    /// See [`Error::UnsupportedCredentialType`]
    UnsupportedCredentialType,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::AmbiguousRecord`]
    AmbiguousRecord,
    /// See [`Error::InvalidCredentials`]
    InvalidCredentials,
    /// See [`Error::UnsupportedAlgorithm`]
    UnsupportedAlgorithm,
    /// See [`Error::StoreFailure`]
    StoreFailure,
    /// See [`Error::Hashing`]
    Hashing,
    /// See [`Error::Configuration`]
    Configuration,
}

impl Error {
    /// Wrap a store error without altering it
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::StoreFailure(Box::new(err))
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::UnsupportedCredentialType(_) => ErrorKind::UnsupportedCredentialType,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::AmbiguousRecord { .. } => ErrorKind::AmbiguousRecord,
            Error::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::StoreFailure(_) => ErrorKind::StoreFailure,
            Error::Hashing(_) => ErrorKind::Hashing,
            Error::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// The store's original error, if this is a store failure of type `E`
    pub fn store_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::StoreFailure(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Check if the caller supplied something wrong (4xx-like)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::UnsupportedCredentialType(_)
                | Error::NotFound { .. }
                | Error::InvalidCredentials { .. }
        )
    }

    /// Check if the failure lies in stored data, the store or setup (5xx-like)
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousRecord { .. }
                | Error::UnsupportedAlgorithm(_)
                | Error::StoreFailure(_)
                | Error::Hashing(_)
                | Error::Configuration(_)
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}

/// Errors raised while checking a stored hash.
///
/// An unknown algorithm keeps its own kind; anything else means the stored
/// value cannot be evaluated as written.
pub(crate) fn from_verify_error(err: HashingError) -> Error {
    match err {
        HashingError::UnsupportedAlgorithm(id) => Error::UnsupportedAlgorithm(id),
        HashingError::InvalidFormat(reason)
        | HashingError::InvalidParameter(reason)
        | HashingError::Backend(reason) => {
            Error::InvalidInput(format!("stored password hash is unusable: {reason}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    #[test]
    fn test_error_categorization() {
        let not_found = Error::NotFound {
            identifier: "ghost".into(),
        };
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let ambiguous = Error::AmbiguousRecord {
            identifier: "Doublette".into(),
            count: 3,
        };
        assert!(ambiguous.is_server_error());
        assert_eq!(ambiguous.to_string(), "More than one user row found for user [Doublette] (3); identifiers must be unique");
    }

    #[test]
    fn test_store_error_is_preserved() {
        let err = Error::store(ConnectionReset);
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert!(err.store_error::<ConnectionReset>().is_some());
        assert!(err.store_error::<std::io::Error>().is_none());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_verify_error_mapping() {
        let unsupported = from_verify_error(HashingError::UnsupportedAlgorithm("md5".into()));
        assert!(matches!(unsupported, Error::UnsupportedAlgorithm(ref id) if id == "md5"));

        let malformed = from_verify_error(HashingError::InvalidFormat("missing leading '$'".into()));
        assert_eq!(malformed.kind(), ErrorKind::InvalidInput);
    }
}
