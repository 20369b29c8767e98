//! Property-based tests for synapsed-hashing

use proptest::prelude::*;
use synapsed_hashing::{HashParams, HashString, HashingStrategy};

/// Cheap cost settings so the properties run quickly
fn cheap_params(id: &str) -> HashParams {
    let pairs: &[(&str, &str)] = match id {
        "argon2id" => &[("m", "8"), ("t", "1"), ("p", "1")],
        "scrypt" => &[("ln", "4"), ("r", "8"), ("p", "1")],
        _ => &[],
    };
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Strategy for algorithm ids registered by default
fn algorithm_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("sha256"),
        Just("sha512"),
        Just("argon2id"),
        Just("scrypt"),
    ]
}

/// Salts long enough for every built-in algorithm
fn salt_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9+/]{8,32}").expect("Invalid regex")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Property: a hash always verifies the password it was made from
    #[test]
    fn test_hash_then_verify_accepts_same_password(
        id in algorithm_strategy(),
        salt in salt_strategy(),
        password in ".{0,64}",
    ) {
        let strategy = HashingStrategy::default();
        let hash = strategy.hash(id, Some(&cheap_params(id)), &salt, &password).unwrap();
        prop_assert!(strategy.verify(&hash, &password).unwrap());
    }

    // Property: a hash never verifies a different password
    #[test]
    fn test_hash_then_verify_rejects_other_password(
        id in algorithm_strategy(),
        salt in salt_strategy(),
        password in ".{0,64}",
        other in ".{0,64}",
    ) {
        prop_assume!(password != other);
        let strategy = HashingStrategy::default();
        let hash = strategy.hash(id, Some(&cheap_params(id)), &salt, &password).unwrap();
        prop_assert!(!strategy.verify(&hash, &other).unwrap());
    }

    // Property: produced strings name their algorithm and re-encode identically
    #[test]
    fn test_hash_string_is_canonical(
        id in algorithm_strategy(),
        salt in salt_strategy(),
        password in ".{0,32}",
    ) {
        let strategy = HashingStrategy::default();
        let hash = strategy.hash(id, Some(&cheap_params(id)), &salt, &password).unwrap();
        let parsed: HashString = hash.parse().unwrap();

        prop_assert_eq!(parsed.id(), id);
        prop_assert_eq!(parsed.salt(), salt.as_bytes());
        prop_assert_eq!(parsed.to_string(), hash);
    }

    // Property: parsing arbitrary text never panics
    #[test]
    fn test_parse_never_panics(input in ".{0,128}") {
        let _ = input.parse::<HashString>();
    }
}
