//! Store filters for identifier lookups
//!
//! The default builder matches on the configured identifier field alone.
//! Deployments that key identities on more than one field (an identifier
//! plus a tenant, say) swap in their own [`QueryBuilder`].

use crate::{Document, FieldMapping};
use serde_json::Value;

/// Builds the filter used to look up a record by identifier.
///
/// Implementations must be deterministic: the same inputs always produce
/// the same filter.
pub trait QueryBuilder: Send + Sync {
    /// Filter selecting the records for `identifier`
    fn identifier_filter(&self, mapping: &FieldMapping, identifier: &str) -> Document;
}

/// `{identifier_field: identifier}`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultQueryBuilder;

impl QueryBuilder for DefaultQueryBuilder {
    fn identifier_filter(&self, mapping: &FieldMapping, identifier: &str) -> Document {
        let mut filter = Document::new();
        filter.insert(
            mapping.identifier_field().to_string(),
            Value::String(identifier.to_string()),
        );
        filter
    }
}

/// The default filter plus fixed discriminator fields, e.g. a tenant id
#[derive(Debug, Default, Clone)]
pub struct ScopedQueryBuilder {
    scope: Document,
}

impl ScopedQueryBuilder {
    /// No discriminators yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` in every lookup
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.scope.insert(field.into(), value.into());
        self
    }
}

impl QueryBuilder for ScopedQueryBuilder {
    fn identifier_filter(&self, mapping: &FieldMapping, identifier: &str) -> Document {
        let mut filter = self.scope.clone();
        // the identifier always wins over a discriminator of the same name
        filter.extend(DefaultQueryBuilder.identifier_filter(mapping, identifier));
        filter
    }
}
