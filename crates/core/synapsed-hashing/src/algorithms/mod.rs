//! Hashing algorithm adapters
//!
//! Each adapter wraps an ecosystem primitive behind [`HashingAlgorithm`] so the
//! strategy can dispatch on the id embedded in a stored hash.

use crate::{HashParams, HashingError, Result};

mod argon2id;
mod scrypt;
mod sha;

pub use self::argon2id::Argon2id;
pub use self::scrypt::Scrypt;
pub use self::sha::{Sha256, Sha512};

/// A password hashing algorithm that can be registered with a strategy
pub trait HashingAlgorithm: Send + Sync {
    /// Id written at the front of every hash string this algorithm produces
    fn id(&self) -> &str;

    /// Fill in defaults and validate caller-supplied parameters.
    ///
    /// The resolved set is what gets embedded in the hash string, so
    /// verification never depends on the defaults in force at the time.
    fn resolve_params(&self, params: &HashParams) -> Result<HashParams> {
        if let Some(key) = params.keys().next() {
            return Err(HashingError::InvalidParameter(format!(
                "{} takes no parameters, got '{key}'",
                self.id()
            )));
        }
        Ok(HashParams::new())
    }

    /// Derive the digest for `password` under resolved `params` and `salt`
    fn derive(&self, params: &HashParams, salt: &[u8], password: &[u8]) -> Result<Vec<u8>>;
}

/// Read a numeric parameter, falling back to `default` when absent
pub(crate) fn numeric_param<T>(params: &HashParams, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match params.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            HashingError::InvalidParameter(format!("parameter '{key}' must be a number"))
        }),
    }
}

/// Refuse a cost above `max`; stored hashes are untrusted input to `verify`
pub(crate) fn cap(id: &str, key: &str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(HashingError::InvalidParameter(format!(
            "{id} parameter '{key}' is {value}, above the limit of {max}"
        )));
    }
    Ok(())
}

/// Reject parameters outside the set an algorithm understands
pub(crate) fn reject_unknown(id: &str, params: &HashParams, known: &[&str]) -> Result<()> {
    match params.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(HashingError::InvalidParameter(format!(
            "{id} does not understand parameter '{key}'"
        ))),
        None => Ok(()),
    }
}
