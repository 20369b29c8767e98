//! Configuration loading from files and the environment

use pretty_assertions::assert_eq;
use std::io::Write;
use synapsed_authn::{AuthnConfig, ErrorKind, FieldMapping};
use tempfile::NamedTempFile;

const OVERRIDES: [&str; 3] = [
    "SYNAPSED_AUTHN_COLLECTION_NAME",
    "SYNAPSED_AUTHN_IDENTIFIER_FIELD",
    "SYNAPSED_AUTHN_HASHING__SALT_LENGTH",
];

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Run `f` with none of the override variables set
fn without_overrides<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(OVERRIDES, f)
}

#[test]
fn test_load_toml() {
    let file = config_file(
        ".toml",
        r#"
identifier_field = "login"
secret_field = "pwd"
collection_name = "accounts"

[hashing]
default_algorithm = "scrypt"
salt_length = 24
"#,
    );

    let config = without_overrides(|| AuthnConfig::load(file.path())).unwrap();

    assert_eq!(config.field_mapping.identifier_field(), "login");
    assert_eq!(config.field_mapping.secret_field(), "pwd");
    assert_eq!(config.field_mapping.credential_identifier_field(), "login");
    assert_eq!(config.field_mapping.credential_secret_field(), "pwd");
    assert_eq!(config.field_mapping.collection_name(), "accounts");
    assert_eq!(config.hashing.default_algorithm, "scrypt");
    assert_eq!(config.hashing.salt_length, 24);
}

#[test]
fn test_load_json() {
    let file = config_file(
        ".json",
        r#"{
  "collection_name": "tenant_users",
  "credential_identifier_field": "user",
  "credential_secret_field": "pass"
}"#,
    );

    let config = without_overrides(|| AuthnConfig::load(file.path())).unwrap();

    let expected = FieldMapping::builder()
        .collection_name("tenant_users")
        .credential_identifier_field("user")
        .credential_secret_field("pass")
        .build()
        .unwrap();
    assert_eq!(config.field_mapping, expected);
    assert_eq!(config.hashing.default_algorithm, "argon2id");
    assert_eq!(config.hashing.salt_length, 16);
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file(".toml", "collection_name = \"accounts\"\n");

    let config = temp_env::with_vars(
        [
            ("SYNAPSED_AUTHN_COLLECTION_NAME", Some("people")),
            ("SYNAPSED_AUTHN_IDENTIFIER_FIELD", None),
            ("SYNAPSED_AUTHN_HASHING__SALT_LENGTH", Some("32")),
        ],
        || AuthnConfig::load(file.path()),
    )
    .unwrap();

    assert_eq!(config.field_mapping.collection_name(), "people");
    assert_eq!(config.field_mapping.identifier_field(), "username");
    assert_eq!(config.hashing.salt_length, 32);
}

#[test]
fn test_from_env() {
    let config = temp_env::with_vars(
        [
            ("SYNAPSED_AUTHN_COLLECTION_NAME", None),
            ("SYNAPSED_AUTHN_IDENTIFIER_FIELD", Some("email")),
            ("SYNAPSED_AUTHN_HASHING__SALT_LENGTH", None),
        ],
        AuthnConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.field_mapping.identifier_field(), "email");
    assert_eq!(config.field_mapping.credential_identifier_field(), "email");
    assert_eq!(config.field_mapping.collection_name(), "user");
    assert_eq!(config.hashing_strategy().default_algorithm(), "argon2id");
}

#[test]
fn test_numeric_looking_names_stay_text() {
    let config = temp_env::with_vars(
        [
            ("SYNAPSED_AUTHN_COLLECTION_NAME", Some("2024")),
            ("SYNAPSED_AUTHN_IDENTIFIER_FIELD", Some("007")),
            ("SYNAPSED_AUTHN_HASHING__SALT_LENGTH", Some("24")),
        ],
        AuthnConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.field_mapping.collection_name(), "2024");
    assert_eq!(config.field_mapping.identifier_field(), "007");
    assert_eq!(config.field_mapping.credential_identifier_field(), "007");
    assert_eq!(config.hashing.salt_length, 24);
}

#[test]
fn test_non_numeric_salt_length_rejected() {
    let err = temp_env::with_vars(
        [
            ("SYNAPSED_AUTHN_COLLECTION_NAME", None),
            ("SYNAPSED_AUTHN_IDENTIFIER_FIELD", None),
            ("SYNAPSED_AUTHN_HASHING__SALT_LENGTH", Some("lots")),
        ],
        AuthnConfig::from_env,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_authorization_section() {
    let file = config_file(
        ".toml",
        r#"
collection_name = "accounts"

[authorization]
collection_name = "accounts"
role_field = "groups"
"#,
    );

    let config = temp_env::with_vars(
        [
            ("SYNAPSED_AUTHN_COLLECTION_NAME", None),
            ("SYNAPSED_AUTHN_IDENTIFIER_FIELD", None),
            ("SYNAPSED_AUTHN_HASHING__SALT_LENGTH", None),
            ("SYNAPSED_AUTHN_AUTHORIZATION__PERMISSION_FIELD", Some("grants")),
        ],
        || AuthnConfig::load(file.path()),
    )
    .unwrap();

    let authorization = &config.authorization;
    assert_eq!(authorization.collection_name(), "accounts");
    assert_eq!(authorization.identifier_field(), "username");
    assert_eq!(authorization.role_field(), "groups");
    assert_eq!(authorization.permission_field(), "grants");
}

#[test]
fn test_invalid_settings_rejected() {
    let empty_field = config_file(".toml", "secret_field = \"\"\n");
    let err = without_overrides(|| AuthnConfig::load(empty_field.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let bad_algorithm = config_file(".toml", "[hashing]\ndefault_algorithm = \"md5\"\n");
    let err = without_overrides(|| AuthnConfig::load(bad_algorithm.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let zero_salt = config_file(".toml", "[hashing]\nsalt_length = 0\n");
    let err = without_overrides(|| AuthnConfig::load(zero_salt.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_missing_file_is_configuration_error() {
    let err = without_overrides(|| AuthnConfig::load("/nonexistent/authn.toml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.is_server_error());
}
