//! Role and permission lookup
//!
//! Authorizations live on the same identity records the engine authenticates
//! against: one field holds role names, another permission names. They are
//! read either from a [`Principal`] that already carries the record or
//! fresh from the store by identifier.

use crate::{CredentialStore, Document, Error, Principal, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Default record field holding role names
pub const DEFAULT_ROLE_FIELD: &str = "roles";

/// Default record field holding permission names
pub const DEFAULT_PERMISSION_FIELD: &str = "permissions";

/// Where roles and permissions live in identity records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAuthorizationOptions", into = "RawAuthorizationOptions")]
pub struct AuthorizationOptions {
    collection_name: String,
    identifier_field: String,
    role_field: String,
    permission_field: String,
}

impl AuthorizationOptions {
    /// Start from the defaults
    pub fn builder() -> AuthorizationOptionsBuilder {
        AuthorizationOptionsBuilder::default()
    }

    /// Collection searched for identity records
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Record field matched against the identifier
    pub fn identifier_field(&self) -> &str {
        &self.identifier_field
    }

    /// Record field holding role names
    pub fn role_field(&self) -> &str {
        &self.role_field
    }

    /// Record field holding permission names
    pub fn permission_field(&self) -> &str {
        &self.permission_field
    }
}

impl Default for AuthorizationOptions {
    fn default() -> Self {
        Self {
            collection_name: crate::config::DEFAULT_COLLECTION_NAME.to_string(),
            identifier_field: crate::config::DEFAULT_IDENTIFIER_FIELD.to_string(),
            role_field: DEFAULT_ROLE_FIELD.to_string(),
            permission_field: DEFAULT_PERMISSION_FIELD.to_string(),
        }
    }
}

/// Builder for [`AuthorizationOptions`]
#[derive(Debug, Clone, Default)]
pub struct AuthorizationOptionsBuilder {
    raw: RawAuthorizationOptions,
}

impl AuthorizationOptionsBuilder {
    /// Collection searched for identity records
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.raw.collection_name = Some(name.into());
        self
    }

    /// Record field matched against the identifier
    pub fn identifier_field(mut self, field: impl Into<String>) -> Self {
        self.raw.identifier_field = Some(field.into());
        self
    }

    /// Record field holding role names
    pub fn role_field(mut self, field: impl Into<String>) -> Self {
        self.raw.role_field = Some(field.into());
        self
    }

    /// Record field holding permission names
    pub fn permission_field(mut self, field: impl Into<String>) -> Self {
        self.raw.permission_field = Some(field.into());
        self
    }

    /// Resolve defaults and reject empty names
    pub fn build(self) -> Result<AuthorizationOptions> {
        AuthorizationOptions::try_from(self.raw)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawAuthorizationOptions {
    #[serde(default, alias = "collectionName")]
    collection_name: Option<String>,
    #[serde(default, alias = "identifierField", alias = "usernameField")]
    identifier_field: Option<String>,
    #[serde(default, alias = "roleField")]
    role_field: Option<String>,
    #[serde(default, alias = "permissionField")]
    permission_field: Option<String>,
}

impl TryFrom<RawAuthorizationOptions> for AuthorizationOptions {
    type Error = Error;

    fn try_from(raw: RawAuthorizationOptions) -> Result<Self> {
        let defaults = AuthorizationOptions::default();
        let options = AuthorizationOptions {
            collection_name: raw.collection_name.unwrap_or(defaults.collection_name),
            identifier_field: raw.identifier_field.unwrap_or(defaults.identifier_field),
            role_field: raw.role_field.unwrap_or(defaults.role_field),
            permission_field: raw.permission_field.unwrap_or(defaults.permission_field),
        };

        for (name, value) in [
            ("collection_name", &options.collection_name),
            ("identifier_field", &options.identifier_field),
            ("role_field", &options.role_field),
            ("permission_field", &options.permission_field),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "authorization {name} must not be empty"
                )));
            }
        }
        Ok(options)
    }
}

impl From<AuthorizationOptions> for RawAuthorizationOptions {
    fn from(options: AuthorizationOptions) -> Self {
        Self {
            collection_name: Some(options.collection_name),
            identifier_field: Some(options.identifier_field),
            role_field: Some(options.role_field),
            permission_field: Some(options.permission_field),
        }
    }
}

/// Roles and permissions granted to one identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorizations {
    roles: BTreeSet<String>,
    permissions: BTreeSet<String>,
}

impl Authorizations {
    /// Read the role and permission fields of a record.
    ///
    /// An absent or null field grants nothing. Anything other than an array
    /// of strings is `InvalidInput`.
    pub fn from_record(record: &Document, options: &AuthorizationOptions) -> Result<Self> {
        Ok(Self {
            roles: names(record, options.role_field())?,
            permissions: names(record, options.permission_field())?,
        })
    }

    /// Whether `role` was granted
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether `permission` was granted
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Granted roles, sorted
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// Granted permissions, sorted
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }

    /// Nothing granted at all
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }
}

fn names(record: &Document, field: &str) -> Result<BTreeSet<String>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::InvalidInput(format!("'{field}' must hold only strings"))
                })
            })
            .collect(),
        Some(_) => Err(Error::InvalidInput(format!(
            "'{field}' must be an array of strings"
        ))),
    }
}

/// Resolves the authorizations of an authenticated principal
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Roles and permissions for `principal`
    async fn authorizations(&self, principal: &Principal) -> Result<Authorizations>;
}

/// Reads roles and permissions from the identity record in a store.
///
/// The record is looked up again by the principal's identifier, so changes
/// made after authentication are seen.
#[derive(Debug, Clone)]
pub struct RecordAuthorization<S> {
    store: S,
    options: AuthorizationOptions,
}

impl<S: CredentialStore> RecordAuthorization<S> {
    /// Provider over `store`
    pub fn new(store: S, options: AuthorizationOptions) -> Self {
        Self { store, options }
    }

    /// Field names this provider was built with
    pub fn options(&self) -> &AuthorizationOptions {
        &self.options
    }

    /// Roles and permissions for `identifier`, which must match exactly one
    /// record
    pub async fn authorizations_for(&self, identifier: &str) -> Result<Authorizations> {
        let collection = self.options.collection_name();
        let mut filter = Document::new();
        filter.insert(
            self.options.identifier_field().to_string(),
            Value::String(identifier.to_string()),
        );

        let mut records = self.store.find(collection, &filter).await.map_err(|err| {
            warn!(collection, identifier, error = %err, "authorization lookup failed");
            Error::store(err)
        })?;

        let record = match records.len() {
            0 => {
                return Err(Error::NotFound {
                    identifier: identifier.to_string(),
                })
            }
            1 => records.remove(0),
            count => {
                warn!(identifier, count, "identifier matched more than one record");
                return Err(Error::AmbiguousRecord {
                    identifier: identifier.to_string(),
                    count,
                });
            }
        };

        let authorizations = Authorizations::from_record(&record, &self.options)?;
        debug!(
            identifier,
            roles = authorizations.roles.len(),
            permissions = authorizations.permissions.len(),
            "loaded authorizations"
        );
        Ok(authorizations)
    }
}

#[async_trait]
impl<S: CredentialStore> AuthorizationProvider for RecordAuthorization<S> {
    async fn authorizations(&self, principal: &Principal) -> Result<Authorizations> {
        let field = self.options.identifier_field();
        let identifier = match principal.get(field) {
            Some(Value::String(identifier)) => identifier,
            _ => {
                return Err(Error::InvalidInput(format!(
                    "principal has no string '{field}' attribute"
                )))
            }
        };
        self.authorizations_for(identifier).await
    }
}
