//! In-memory credential store for tests and embedded use

use super::CredentialStore;
use crate::Document;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by [`MemoryCredentialStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// Documents must be JSON objects
    #[error("document is not a JSON object")]
    NotAnObject,
}

/// Collections of JSON documents held in memory.
///
/// Lookups match a document when every filter entry equals the document's
/// field of the same name.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to `collection`
    pub fn insert(&self, collection: &str, document: Value) -> Result<(), MemoryStoreError> {
        let Value::Object(document) = document else {
            return Err(MemoryStoreError::NotAnObject);
        };

        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    /// Number of documents in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Whether `collection` holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Drop every document in `collection`
    pub fn clear(&self, collection: &str) {
        self.collections.write().remove(collection);
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    type Error = MemoryStoreError;

    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, Self::Error> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
