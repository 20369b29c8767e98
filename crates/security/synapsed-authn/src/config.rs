//! Configuration for credential authentication
//!
//! [`FieldMapping`] says where identifiers and secrets live, both in stored
//! records and in incoming JSON credentials. [`AuthnConfig`] adds the hashing
//! and authorization sections and knows how to load itself from files and the
//! environment.

use crate::{AuthorizationOptions, Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::Path;
use synapsed_hashing::{HashingStrategy, DEFAULT_ALGORITHM, DEFAULT_SALT_LENGTH};

/// Default collection holding identity records
pub const DEFAULT_COLLECTION_NAME: &str = "user";

/// Default record field holding the identifier
pub const DEFAULT_IDENTIFIER_FIELD: &str = "username";

/// Default record field holding the password hash
pub const DEFAULT_SECRET_FIELD: &str = "password";

/// Environment variable prefix used by [`AuthnConfig::load`]
pub const ENV_PREFIX: &str = "SYNAPSED_AUTHN";

/// Field and collection names used to look up and read identity records.
///
/// Immutable once built; use [`FieldMapping::builder`] to override defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldMapping", into = "RawFieldMapping")]
pub struct FieldMapping {
    identifier_field: String,
    secret_field: String,
    credential_identifier_field: String,
    credential_secret_field: String,
    collection_name: String,
}

impl FieldMapping {
    /// Start from the defaults
    pub fn builder() -> FieldMappingBuilder {
        FieldMappingBuilder::default()
    }

    /// Record field matched against the supplied identifier
    pub fn identifier_field(&self) -> &str {
        &self.identifier_field
    }

    /// Record field holding the password hash
    pub fn secret_field(&self) -> &str {
        &self.secret_field
    }

    /// Field carrying the identifier in JSON credentials
    pub fn credential_identifier_field(&self) -> &str {
        &self.credential_identifier_field
    }

    /// Field carrying the secret in JSON credentials
    pub fn credential_secret_field(&self) -> &str {
        &self.credential_secret_field
    }

    /// Collection searched for identity records
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            identifier_field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            secret_field: DEFAULT_SECRET_FIELD.to_string(),
            credential_identifier_field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            credential_secret_field: DEFAULT_SECRET_FIELD.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
        }
    }
}

/// Builder for [`FieldMapping`]
#[derive(Debug, Clone, Default)]
pub struct FieldMappingBuilder {
    raw: RawFieldMapping,
}

impl FieldMappingBuilder {
    /// Record field matched against the supplied identifier
    pub fn identifier_field(mut self, field: impl Into<String>) -> Self {
        self.raw.identifier_field = Some(field.into());
        self
    }

    /// Record field holding the password hash
    pub fn secret_field(mut self, field: impl Into<String>) -> Self {
        self.raw.secret_field = Some(field.into());
        self
    }

    /// Field carrying the identifier in JSON credentials.
    /// Defaults to the identifier field.
    pub fn credential_identifier_field(mut self, field: impl Into<String>) -> Self {
        self.raw.credential_identifier_field = Some(field.into());
        self
    }

    /// Field carrying the secret in JSON credentials.
    /// Defaults to the secret field.
    pub fn credential_secret_field(mut self, field: impl Into<String>) -> Self {
        self.raw.credential_secret_field = Some(field.into());
        self
    }

    /// Collection searched for identity records
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.raw.collection_name = Some(name.into());
        self
    }

    /// Resolve defaults and reject empty names
    pub fn build(self) -> Result<FieldMapping> {
        FieldMapping::try_from(self.raw)
    }
}

/// Serialized form; every key optional, camelCase aliases accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawFieldMapping {
    #[serde(default, alias = "identifierField", alias = "usernameField")]
    identifier_field: Option<String>,
    #[serde(default, alias = "secretField", alias = "passwordField")]
    secret_field: Option<String>,
    #[serde(
        default,
        alias = "credentialIdentifierField",
        alias = "usernameCredentialField"
    )]
    credential_identifier_field: Option<String>,
    #[serde(
        default,
        alias = "credentialSecretField",
        alias = "passwordCredentialField"
    )]
    credential_secret_field: Option<String>,
    #[serde(default, alias = "collectionName")]
    collection_name: Option<String>,
}

impl TryFrom<RawFieldMapping> for FieldMapping {
    type Error = Error;

    fn try_from(raw: RawFieldMapping) -> Result<Self> {
        let identifier_field = raw
            .identifier_field
            .unwrap_or_else(|| DEFAULT_IDENTIFIER_FIELD.to_string());
        let secret_field = raw
            .secret_field
            .unwrap_or_else(|| DEFAULT_SECRET_FIELD.to_string());

        let mapping = FieldMapping {
            credential_identifier_field: raw
                .credential_identifier_field
                .unwrap_or_else(|| identifier_field.clone()),
            credential_secret_field: raw
                .credential_secret_field
                .unwrap_or_else(|| secret_field.clone()),
            collection_name: raw
                .collection_name
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
            identifier_field,
            secret_field,
        };

        for (name, value) in [
            ("identifier_field", &mapping.identifier_field),
            ("secret_field", &mapping.secret_field),
            ("credential_identifier_field", &mapping.credential_identifier_field),
            ("credential_secret_field", &mapping.credential_secret_field),
            ("collection_name", &mapping.collection_name),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("{name} must not be empty")));
            }
        }

        Ok(mapping)
    }
}

impl From<FieldMapping> for RawFieldMapping {
    fn from(mapping: FieldMapping) -> Self {
        Self {
            identifier_field: Some(mapping.identifier_field),
            secret_field: Some(mapping.secret_field),
            credential_identifier_field: Some(mapping.credential_identifier_field),
            credential_secret_field: Some(mapping.credential_secret_field),
            collection_name: Some(mapping.collection_name),
        }
    }
}

/// Settings for creating new password hashes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Algorithm used for new hashes
    #[serde(default = "default_algorithm", alias = "defaultAlgorithm")]
    pub default_algorithm: String,

    /// Generated salt length in bytes
    #[serde(
        default = "default_salt_length",
        alias = "saltLength",
        deserialize_with = "number_or_text"
    )]
    pub salt_length: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            default_algorithm: default_algorithm(),
            salt_length: default_salt_length(),
        }
    }
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

fn default_salt_length() -> usize {
    DEFAULT_SALT_LENGTH
}

/// Environment values arrive as text; files may carry real numbers.
fn number_or_text<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(|_| {
            de::Error::custom(format!("salt_length must be a number, got '{text}'"))
        }),
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnConfig {
    /// Record and credential field names
    #[serde(flatten)]
    pub field_mapping: FieldMapping,

    /// Hash creation settings
    #[serde(default)]
    pub hashing: HashingConfig,

    /// Role and permission fields; names its own collection and identifier
    /// field, independent of `field_mapping`
    #[serde(default)]
    pub authorization: AuthorizationOptions,
}

impl AuthnConfig {
    /// Load from a TOML or JSON file, then apply `SYNAPSED_AUTHN_*` overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;
        Self::finish(settings)
    }

    /// Load from `SYNAPSED_AUTHN_*` environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;
        Self::finish(settings)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn finish(settings: config::Config) -> Result<Self> {
        let config: AuthnConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce hashes
    pub fn validate(&self) -> Result<()> {
        let strategy = HashingStrategy::default();
        if !strategy.supports(&self.hashing.default_algorithm) {
            return Err(Error::Configuration(format!(
                "unknown default hashing algorithm '{}'",
                self.hashing.default_algorithm
            )));
        }
        if self.hashing.salt_length == 0 {
            return Err(Error::Configuration("salt_length must be positive".into()));
        }
        Ok(())
    }

    /// Built-in hashing strategy honoring the hashing section
    pub fn hashing_strategy(&self) -> HashingStrategy {
        HashingStrategy::default()
            .with_default_algorithm(self.hashing.default_algorithm.clone())
            .with_salt_length(self.hashing.salt_length)
    }
}
