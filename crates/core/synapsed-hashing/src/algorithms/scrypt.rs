//! scrypt adapter over the `scrypt` crate

use super::{cap, numeric_param, reject_unknown, HashingAlgorithm};
use crate::{HashParams, HashingError, Result};

const DEFAULT_LOG_N: u8 = 15;
const DEFAULT_R: u32 = 8;
const DEFAULT_P: u32 = 1;
const OUTPUT_LEN: usize = 32;

const MAX_LOG_N: u8 = 20;
const MAX_R: u32 = 32;
const MAX_P: u32 = 16;
// working memory is 128 * r * 2^ln bytes
const MAX_MEMORY_BYTES: u64 = 1 << 30;

/// scrypt.
///
/// Parameters: `ln` log2 of the CPU/memory cost, `r` block size, `p` parallelism.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scrypt;

impl Scrypt {
    fn params(params: &HashParams) -> Result<(u8, u32, u32, ::scrypt::Params)> {
        let log_n = numeric_param(params, "ln", DEFAULT_LOG_N)?;
        let r = numeric_param(params, "r", DEFAULT_R)?;
        let p = numeric_param(params, "p", DEFAULT_P)?;
        cap("scrypt", "ln", log_n.into(), MAX_LOG_N.into())?;
        cap("scrypt", "r", r.into(), MAX_R.into())?;
        cap("scrypt", "p", p.into(), MAX_P.into())?;
        cap(
            "scrypt",
            "memory",
            128 * u64::from(r) << log_n,
            MAX_MEMORY_BYTES,
        )?;

        let built = ::scrypt::Params::new(log_n, r, p, OUTPUT_LEN)
            .map_err(|e| HashingError::InvalidParameter(format!("scrypt: {e}")))?;
        Ok((log_n, r, p, built))
    }
}

impl HashingAlgorithm for Scrypt {
    fn id(&self) -> &str {
        "scrypt"
    }

    fn resolve_params(&self, params: &HashParams) -> Result<HashParams> {
        reject_unknown(self.id(), params, &["ln", "r", "p"])?;
        let (log_n, r, p, _) = Self::params(params)?;

        let mut out = HashParams::new();
        out.insert("ln".into(), log_n.to_string());
        out.insert("r".into(), r.to_string());
        out.insert("p".into(), p.to_string());
        Ok(out)
    }

    fn derive(&self, params: &HashParams, salt: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        let (_, _, _, built) = Self::params(params)?;

        let mut digest = vec![0u8; OUTPUT_LEN];
        ::scrypt::scrypt(password, salt, &built, &mut digest)
            .map_err(|e| HashingError::Backend(format!("scrypt: {e}")))?;
        Ok(digest)
    }
}
