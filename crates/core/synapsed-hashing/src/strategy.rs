//! Hashing strategy
//!
//! The strategy owns a per-instance set of algorithms. Hashes are created with
//! an explicit algorithm id (or the configured default) and verified by the id
//! embedded in the stored string, so changing the default never strands hashes
//! created under an earlier one.

use crate::algorithms::{Argon2id, HashingAlgorithm, Scrypt, Sha256, Sha512};
use crate::hash_string::check_encodable;
use crate::{HashParams, HashString, HashingError, Result};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Algorithm used for new hashes when none is named
pub const DEFAULT_ALGORITHM: &str = "argon2id";

/// Salt length in bytes used by [`HashingStrategy::generate_salt`]
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Creates and verifies self-describing password hashes
#[derive(Clone)]
pub struct HashingStrategy {
    algorithms: BTreeMap<String, Arc<dyn HashingAlgorithm>>,
    default_algorithm: String,
    salt_length: usize,
}

impl HashingStrategy {
    /// A strategy with no algorithms registered
    pub fn empty() -> Self {
        Self {
            algorithms: BTreeMap::new(),
            default_algorithm: DEFAULT_ALGORITHM.to_string(),
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    /// Register an algorithm, replacing any previous one with the same id
    pub fn register<A>(mut self, algorithm: A) -> Self
    where
        A: HashingAlgorithm + 'static,
    {
        self.algorithms
            .insert(algorithm.id().to_string(), Arc::new(algorithm));
        self
    }

    /// Algorithm used by [`hash_password`](Self::hash_password)
    pub fn with_default_algorithm(mut self, id: impl Into<String>) -> Self {
        self.default_algorithm = id.into();
        self
    }

    /// Salt length used by [`generate_salt`](Self::generate_salt)
    pub fn with_salt_length(mut self, bytes: usize) -> Self {
        self.salt_length = bytes;
        self
    }

    /// Registered algorithm ids, in order
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.algorithms.keys().map(String::as_str)
    }

    /// Whether a verifier is registered for `id`
    pub fn supports(&self, id: &str) -> bool {
        self.algorithms.contains_key(id)
    }

    /// Id of the algorithm used for new hashes
    pub fn default_algorithm(&self) -> &str {
        &self.default_algorithm
    }

    fn algorithm(&self, id: &str) -> Result<&Arc<dyn HashingAlgorithm>> {
        self.algorithms
            .get(id)
            .ok_or_else(|| HashingError::UnsupportedAlgorithm(id.to_string()))
    }

    /// Hash `password` with algorithm `id`.
    ///
    /// Missing `params` are filled with the algorithm defaults; the resolved
    /// set is embedded in the returned string.
    pub fn hash(
        &self,
        id: &str,
        params: Option<&HashParams>,
        salt: &str,
        password: &str,
    ) -> Result<String> {
        let algorithm = self.algorithm(id)?;
        let empty = HashParams::new();
        let resolved = algorithm.resolve_params(params.unwrap_or(&empty))?;
        check_encodable(&resolved)?;

        let digest = algorithm.derive(&resolved, salt.as_bytes(), password.as_bytes())?;
        let encoded = HashString::new(id, resolved, salt.as_bytes().to_vec(), digest).to_string();

        debug!(algorithm = id, "created password hash");
        Ok(encoded)
    }

    /// Hash with the algorithm defaults
    pub fn hash_with_salt(&self, id: &str, salt: &str, password: &str) -> Result<String> {
        self.hash(id, None, salt, password)
    }

    /// Hash with the default algorithm and a freshly generated salt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = self.generate_salt();
        self.hash(&self.default_algorithm, None, &salt, password)
    }

    /// Random salt from the OS RNG, as unpadded base64 text
    pub fn generate_salt(&self) -> String {
        let mut bytes = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut bytes);
        STANDARD_NO_PAD.encode(bytes)
    }

    /// Check `password` against a stored hash string.
    ///
    /// `Ok(false)` means the hash was understood and the password does not
    /// match. A malformed string or an unregistered algorithm is an error.
    pub fn verify(&self, hash: &str, password: &str) -> Result<bool> {
        let parsed: HashString = hash.parse()?;
        let algorithm = self.algorithm(parsed.id())?;
        let resolved = algorithm.resolve_params(parsed.params())?;

        let computed = algorithm.derive(&resolved, parsed.salt(), password.as_bytes())?;
        Ok(parsed.digest().ct_eq(&computed).into())
    }
}

impl Default for HashingStrategy {
    /// All built-in algorithms, argon2id for new hashes
    fn default() -> Self {
        Self::empty()
            .register(Sha256)
            .register(Sha512)
            .register(Argon2id)
            .register(Scrypt)
    }
}

impl fmt::Debug for HashingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingStrategy")
            .field("algorithms", &self.algorithms.keys().collect::<Vec<_>>())
            .field("default_algorithm", &self.default_algorithm)
            .field("salt_length", &self.salt_length)
            .finish()
    }
}
