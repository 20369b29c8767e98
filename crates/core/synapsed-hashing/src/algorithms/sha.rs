//! Salted SHA-2 digests
//!
//! `H(salt || password)`. Kept for records created by older systems; new
//! hashes should use argon2id or scrypt.

use super::HashingAlgorithm;
use crate::{HashParams, Result};
use sha2::Digest;

/// Salted SHA-256
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256;

/// Salted SHA-512
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512;

fn salted<D: Digest>(salt: &[u8], password: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(salt);
    hasher.update(password);
    hasher.finalize().to_vec()
}

impl HashingAlgorithm for Sha256 {
    fn id(&self) -> &str {
        "sha256"
    }

    fn derive(&self, _params: &HashParams, salt: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        Ok(salted::<sha2::Sha256>(salt, password))
    }
}

impl HashingAlgorithm for Sha512 {
    fn id(&self) -> &str {
        "sha512"
    }

    fn derive(&self, _params: &HashParams, salt: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        Ok(salted::<sha2::Sha512>(salt, password))
    }
}
