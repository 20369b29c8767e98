//! Storage traits for identity lookups

use crate::Document;
use async_trait::async_trait;

/// Read access to a document store holding identity records.
///
/// Authentication only ever reads; writes belong to whatever provisions the
/// records. Timeouts and connection handling are the implementation's job.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Error type for store operations, surfaced unchanged to callers
    type Error: std::error::Error + Send + Sync + 'static;

    /// All documents in `collection` whose fields equal every entry in `filter`
    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, Self::Error>;
}

#[async_trait]
impl<S> CredentialStore for std::sync::Arc<S>
where
    S: CredentialStore + ?Sized,
{
    type Error = S::Error;

    async fn find(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, Self::Error> {
        (**self).find(collection, filter).await
    }
}
