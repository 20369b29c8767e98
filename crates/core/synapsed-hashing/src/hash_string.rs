//! Self-describing hash strings
//!
//! A stored hash carries everything needed to re-derive its digest:
//!
//! ```text
//! $argon2id$m=19456,p=1,t=2$c2FsdHNhbHQ$3mUeF0rP...
//!  ^id      ^params         ^salt       ^digest
//! ```
//!
//! Parameters are `k=v` pairs in key order. Salt and digest are unpadded
//! standard base64.

use crate::{HashingError, Result};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Algorithm parameters, ordered so the encoded form is canonical
pub type HashParams = BTreeMap<String, String>;

const SEPARATOR: char = '$';

/// A parsed `$id$params$salt$digest` string
#[derive(Clone, PartialEq, Eq)]
pub struct HashString {
    id: String,
    params: HashParams,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl HashString {
    /// Assemble a hash string from its parts
    pub fn new(id: impl Into<String>, params: HashParams, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            params,
            salt,
            digest,
        }
    }

    /// Algorithm id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parameters the digest was derived with
    pub fn params(&self) -> &HashParams {
        &self.params
    }

    /// Raw salt bytes
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Raw digest bytes
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

// The digest stays out of debug output so hashes do not end up in logs.
impl fmt::Debug for HashString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashString")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("salt_len", &self.salt.len())
            .field("digest_len", &self.digest.len())
            .finish()
    }
}

impl fmt::Display for HashString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}${}${}${}",
            self.id,
            encode_params(&self.params),
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.digest)
        )
    }
}

impl FromStr for HashString {
    type Err = HashingError;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(SEPARATOR)
            .ok_or_else(|| HashingError::InvalidFormat("missing leading '$'".into()))?;

        let sections: Vec<&str> = rest.split(SEPARATOR).collect();
        if sections.len() != 4 {
            return Err(HashingError::InvalidFormat(format!(
                "expected 4 sections, found {}",
                sections.len()
            )));
        }

        let id = sections[0];
        if id.is_empty() {
            return Err(HashingError::InvalidFormat("empty algorithm id".into()));
        }

        let params = parse_params(sections[1])?;
        let salt = decode_section(sections[2], "salt")?;
        let digest = decode_section(sections[3], "digest")?;
        if digest.is_empty() {
            return Err(HashingError::InvalidFormat("empty digest".into()));
        }

        Ok(Self {
            id: id.to_string(),
            params,
            salt,
            digest,
        })
    }
}

/// Encode parameters as `k=v,k=v`
pub fn encode_params(params: &HashParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a `k=v,k=v` parameter section; an empty section yields no parameters
pub fn parse_params(section: &str) -> Result<HashParams> {
    let mut params = HashParams::new();
    if section.is_empty() {
        return Ok(params);
    }

    for pair in section.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| HashingError::InvalidFormat(format!("parameter '{pair}' has no value")))?;
        if key.is_empty() {
            return Err(HashingError::InvalidFormat("parameter with empty name".into()));
        }
        params.insert(key.to_string(), value.to_string());
    }

    Ok(params)
}

/// Reject parameter names or values that would break the encoded layout
pub(crate) fn check_encodable(params: &HashParams) -> Result<()> {
    let reserved = |s: &str| s.contains([SEPARATOR, ',', '=']);
    for (key, value) in params {
        if key.is_empty() || reserved(key) || reserved(value) {
            return Err(HashingError::InvalidParameter(format!(
                "parameter '{key}' contains a reserved character"
            )));
        }
    }
    Ok(())
}

fn decode_section(section: &str, what: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(section)
        .map_err(|_| HashingError::InvalidFormat(format!("{what} is not valid base64")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> HashParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_display_then_parse() {
        let hash = HashString::new(
            "argon2id",
            params(&[("t", "2"), ("m", "19456"), ("p", "1")]),
            b"saltsalt".to_vec(),
            vec![1, 2, 3, 4],
        );

        let encoded = hash.to_string();
        assert_eq!(encoded, "$argon2id$m=19456,p=1,t=2$c2FsdHNhbHQ$AQIDBA");
        assert_eq!(encoded.parse::<HashString>().unwrap(), hash);
    }

    #[test]
    fn test_empty_params_and_salt() {
        let parsed: HashString = "$sha512$$$AQID".parse().unwrap();
        assert_eq!(parsed.id(), "sha512");
        assert!(parsed.params().is_empty());
        assert!(parsed.salt().is_empty());
        assert_eq!(parsed.digest(), &[1, 2, 3]);
    }

    #[test]
    fn test_malformed_strings() {
        for bad in [
            "",
            "plaintext",
            "sha512$$$AQID",
            "$sha512$$AQID",
            "$$$$AQID",
            "$sha512$$$",
            "$sha512$noequals$$AQID",
            "$sha512$=1$$AQID",
            "$sha512$$!!!$AQID",
            "$sha512$$$AQID$extra",
        ] {
            let err = bad.parse::<HashString>().unwrap_err();
            assert!(err.is_malformed(), "expected malformed for {bad:?}, got {err:?}");
        }
    }

    #[test]
    fn test_debug_hides_digest() {
        let hash = HashString::new("sha256", HashParams::new(), vec![7; 4], vec![9; 32]);
        let debug = format!("{hash:?}");
        assert!(debug.contains("digest_len: 32"));
        assert!(!debug.contains(&STANDARD_NO_PAD.encode([9u8; 32])));
    }

    #[test]
    fn test_reserved_characters_rejected() {
        assert!(check_encodable(&params(&[("m", "1")])).is_ok());
        assert!(check_encodable(&params(&[("m", "1$2")])).is_err());
        assert!(check_encodable(&params(&[("a,b", "1")])).is_err());
        assert!(check_encodable(&params(&[("k", "x=y")])).is_err());
    }
}
