//! Argon2id adapter over the `argon2` crate

use super::{cap, numeric_param, reject_unknown, HashingAlgorithm};
use crate::{HashParams, HashingError, Result};
use argon2::{Algorithm, Argon2, Params, Version};

const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
const DEFAULT_ITERATIONS: u32 = 2;
const DEFAULT_PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;
const MIN_SALT_LEN: usize = 8;

// 1 GiB of memory, bounded time and lanes
const MAX_MEMORY_KIB: u32 = 1024 * 1024;
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 16;

/// Argon2id, version 0x13.
///
/// Parameters: `m` memory in KiB, `t` iterations, `p` lanes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2id;

impl Argon2id {
    fn hasher(params: &HashParams) -> Result<Argon2<'static>> {
        let memory = numeric_param(params, "m", DEFAULT_MEMORY_KIB)?;
        let iterations = numeric_param(params, "t", DEFAULT_ITERATIONS)?;
        let parallelism = numeric_param(params, "p", DEFAULT_PARALLELISM)?;
        cap("argon2id", "m", memory.into(), MAX_MEMORY_KIB.into())?;
        cap("argon2id", "t", iterations.into(), MAX_ITERATIONS.into())?;
        cap("argon2id", "p", parallelism.into(), MAX_PARALLELISM.into())?;

        let params = Params::new(memory, iterations, parallelism, Some(OUTPUT_LEN))
            .map_err(|e| HashingError::InvalidParameter(format!("argon2id: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl HashingAlgorithm for Argon2id {
    fn id(&self) -> &str {
        "argon2id"
    }

    fn resolve_params(&self, params: &HashParams) -> Result<HashParams> {
        reject_unknown(self.id(), params, &["m", "t", "p"])?;
        let hasher = Self::hasher(params)?;
        let resolved = hasher.params();

        let mut out = HashParams::new();
        out.insert("m".into(), resolved.m_cost().to_string());
        out.insert("t".into(), resolved.t_cost().to_string());
        out.insert("p".into(), resolved.p_cost().to_string());
        Ok(out)
    }

    fn derive(&self, params: &HashParams, salt: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        if salt.len() < MIN_SALT_LEN {
            return Err(HashingError::InvalidParameter(format!(
                "argon2id needs a salt of at least {MIN_SALT_LEN} bytes"
            )));
        }

        let mut digest = vec![0u8; OUTPUT_LEN];
        Self::hasher(params)?
            .hash_password_into(password, salt, &mut digest)
            .map_err(|e| HashingError::Backend(format!("argon2id: {e}")))?;
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> HashParams {
        [("m", "8"), ("t", "1"), ("p", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_resolved() {
        let resolved = Argon2id.resolve_params(&HashParams::new()).unwrap();
        assert_eq!(resolved.get("m").map(String::as_str), Some("19456"));
        assert_eq!(resolved.get("t").map(String::as_str), Some("2"));
        assert_eq!(resolved.get("p").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_short_salt_rejected() {
        let err = Argon2id.derive(&cheap(), b"short", b"pw").unwrap_err();
        assert!(matches!(err, HashingError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let mut params = cheap();
        params.insert("t".into(), "0".into());
        assert!(Argon2id.resolve_params(&params).is_err());
    }

    #[test]
    fn test_excessive_cost_rejected() {
        for (key, value) in [("m", "268435455"), ("t", "4294967295"), ("p", "255")] {
            let mut params = cheap();
            params.insert(key.into(), value.into());
            let err = Argon2id.resolve_params(&params).unwrap_err();
            assert!(matches!(err, HashingError::InvalidParameter(_)), "{key}");
            assert!(Argon2id.derive(&params, b"saltsalt", b"pw").is_err(), "{key}");
        }
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let a = Argon2id.derive(&cheap(), b"saltsalt", b"sausages").unwrap();
        let b = Argon2id.derive(&cheap(), b"saltsalt", b"sausages").unwrap();
        let c = Argon2id.derive(&cheap(), b"saltsalt", b"eggs").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
