//! Identifier/secret authentication against a credential store
//!
//! One call is one pass: validate the credentials, read the matching records
//! once, insist on exactly one, verify the secret through the hashing
//! strategy and build the principal. Nothing is retried and no state is kept
//! between calls.

use super::AuthenticationProvider;
use crate::error::from_verify_error;
use crate::principal::AMR_PASSWORD;
use crate::{
    CredentialStore, Credentials, DefaultQueryBuilder, Document, Error, FieldMapping,
    PasswordCredentials, Principal, QueryBuilder, Result,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use synapsed_hashing::{HashParams, HashingStrategy};
use tracing::{debug, info, warn};

/// Authenticates identifier/secret credentials against stored records
#[derive(Debug, Clone)]
pub struct AuthenticationEngine<S, Q = DefaultQueryBuilder> {
    store: S,
    hashing: Arc<HashingStrategy>,
    field_mapping: FieldMapping,
    query_builder: Q,
}

impl<S: CredentialStore> AuthenticationEngine<S> {
    /// Engine with the given mapping and the default query builder
    pub fn new(store: S, hashing: Arc<HashingStrategy>, field_mapping: FieldMapping) -> Self {
        Self::builder(store, hashing).field_mapping(field_mapping).build()
    }

    /// Start building an engine with default field names
    pub fn builder(store: S, hashing: Arc<HashingStrategy>) -> EngineBuilder<S> {
        EngineBuilder {
            store,
            hashing,
            field_mapping: FieldMapping::default(),
            query_builder: DefaultQueryBuilder,
        }
    }
}

impl<S, Q> AuthenticationEngine<S, Q>
where
    S: CredentialStore,
    Q: QueryBuilder,
{
    /// Field names this engine was built with
    pub fn field_mapping(&self) -> &FieldMapping {
        &self.field_mapping
    }

    /// The injected hashing strategy
    pub fn hashing(&self) -> &HashingStrategy {
        &self.hashing
    }

    /// Authenticate credentials given as a JSON object, read through the
    /// mapping's credential fields
    pub async fn authenticate_json(&self, credentials: &Value) -> Result<Principal> {
        let credentials = Credentials::from_json(credentials, &self.field_mapping)?;
        self.authenticate(credentials).await
    }

    /// Hash a password for storage with the injected strategy
    pub fn hash(
        &self,
        id: &str,
        params: Option<&HashParams>,
        salt: &str,
        password: &str,
    ) -> Result<String> {
        self.hashing
            .hash(id, params, salt, password)
            .map_err(Error::Hashing)
    }

    /// Hash a password for storage using the algorithm's default parameters
    pub fn hash_with_salt(&self, id: &str, salt: &str, password: &str) -> Result<String> {
        self.hash(id, None, salt, password)
    }

    fn accept(credentials: Credentials) -> Result<PasswordCredentials> {
        match credentials {
            Credentials::Password(credentials) => {
                credentials.check_valid()?;
                Ok(credentials)
            }
            other => Err(Error::UnsupportedCredentialType(format!(
                "{} credentials are not accepted, expected identifier and secret",
                other.type_name()
            ))),
        }
    }

    /// Exactly one record, or an error
    fn select(identifier: &str, mut records: Vec<Document>) -> Result<Document> {
        match records.len() {
            0 => Err(Error::NotFound {
                identifier: identifier.to_string(),
            }),
            1 => Ok(records.remove(0)),
            count => {
                warn!(identifier, count, "identifier matched more than one record");
                Err(Error::AmbiguousRecord {
                    identifier: identifier.to_string(),
                    count,
                })
            }
        }
    }

    fn verify(&self, credentials: &PasswordCredentials, record: &Document) -> Result<()> {
        let field = self.field_mapping.secret_field();
        let stored = match record.get(field) {
            Some(Value::String(hash)) => hash,
            None | Some(Value::Null) => {
                return Err(Error::InvalidInput(format!(
                    "record for [{}] has no '{field}' field",
                    credentials.identifier()
                )))
            }
            Some(_) => {
                return Err(Error::InvalidInput(format!(
                    "record for [{}] holds a non-string '{field}' field",
                    credentials.identifier()
                )))
            }
        };

        let verified = self
            .hashing
            .verify(stored, credentials.secret())
            .map_err(|err| {
                warn!(identifier = credentials.identifier(), error = %err, "stored hash could not be checked");
                from_verify_error(err)
            })?;

        if verified {
            Ok(())
        } else {
            Err(Error::InvalidCredentials {
                identifier: credentials.identifier().to_string(),
            })
        }
    }
}

#[async_trait]
impl<S, Q> AuthenticationProvider for AuthenticationEngine<S, Q>
where
    S: CredentialStore,
    Q: QueryBuilder,
{
    async fn authenticate(&self, credentials: Credentials) -> Result<Principal> {
        let credentials = Self::accept(credentials)?;
        let identifier = credentials.identifier();
        let collection = self.field_mapping.collection_name();

        let filter = self
            .query_builder
            .identifier_filter(&self.field_mapping, identifier);
        debug!(collection, identifier, "looking up identity record");

        let records = self.store.find(collection, &filter).await.map_err(|err| {
            warn!(collection, identifier, error = %err, "credential store lookup failed");
            Error::store(err)
        })?;
        debug!(identifier, matches = records.len(), "identity lookup finished");

        let record = Self::select(identifier, records)?;
        self.verify(&credentials, &record)?;

        info!(identifier, "authenticated");
        Ok(Principal::new(record, vec![AMR_PASSWORD.to_string()]))
    }
}

/// Builder for [`AuthenticationEngine`]
#[derive(Debug)]
pub struct EngineBuilder<S, Q = DefaultQueryBuilder> {
    store: S,
    hashing: Arc<HashingStrategy>,
    field_mapping: FieldMapping,
    query_builder: Q,
}

impl<S, Q> EngineBuilder<S, Q>
where
    S: CredentialStore,
    Q: QueryBuilder,
{
    /// Record and credential field names
    pub fn field_mapping(mut self, field_mapping: FieldMapping) -> Self {
        self.field_mapping = field_mapping;
        self
    }

    /// Replace the filter construction, e.g. for compound keys
    pub fn query_builder<Q2: QueryBuilder>(self, query_builder: Q2) -> EngineBuilder<S, Q2> {
        EngineBuilder {
            store: self.store,
            hashing: self.hashing,
            field_mapping: self.field_mapping,
            query_builder,
        }
    }

    /// Finish building
    pub fn build(self) -> AuthenticationEngine<S, Q> {
        AuthenticationEngine {
            store: self.store,
            hashing: self.hashing,
            field_mapping: self.field_mapping,
            query_builder: self.query_builder,
        }
    }
}
