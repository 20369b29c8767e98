//! Common test utilities and fixtures for synapsed-authn

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use synapsed_authn::{
    AuthenticationEngine, Document, FieldMapping, HashParams, HashingStrategy,
    MemoryCredentialStore,
};

/// Collection the fixture seeds
pub const COLLECTION: &str = "user";

/// Argon2id parameters cheap enough for tests
pub fn cheap_argon2() -> HashParams {
    [("m", "8"), ("t", "1"), ("p", "1")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A seeded in-memory store with a shared hashing strategy
pub struct AuthnTestFixture {
    pub store: Arc<MemoryCredentialStore>,
    pub hashing: Arc<HashingStrategy>,
}

impl AuthnTestFixture {
    /// Michael/ps1, tim/sausages and three "Doublette" records sharing one password
    pub fn new() -> Self {
        synapsed_authn::telemetry::init_test_tracing();

        let fixture = Self {
            store: Arc::new(MemoryCredentialStore::new()),
            hashing: Arc::new(HashingStrategy::default()),
        };

        fixture.add_user("Michael", "ps1", &["developer"]);
        fixture.add_user("tim", "sausages", &["morris_dancer", "superadmin"]);
        for _ in 0..3 {
            fixture.add_user("Doublette", "ps1", &["developer"]);
        }
        fixture
    }

    /// Insert a user record hashed with cheap argon2id parameters
    pub fn add_user(&self, username: &str, password: &str, roles: &[&str]) -> Value {
        let salt = self.hashing.generate_salt();
        let hash = self
            .hashing
            .hash("argon2id", Some(&cheap_argon2()), &salt, password)
            .unwrap();
        let record = json!({
            "username": username,
            "password": hash,
            "roles": roles,
        });
        self.store.insert(COLLECTION, record.clone()).unwrap();
        record
    }

    /// Engine over the fixture store with default field names
    pub fn engine(&self) -> AuthenticationEngine<Arc<MemoryCredentialStore>> {
        AuthenticationEngine::new(
            self.store.clone(),
            self.hashing.clone(),
            FieldMapping::default(),
        )
    }
}

/// Unwrap a JSON object literal into a document
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
