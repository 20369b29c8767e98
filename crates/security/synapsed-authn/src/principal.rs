//! The identity produced by a successful authentication

use crate::Document;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Reserved key holding the authentication methods reference
pub const AMR_KEY: &str = "amr";

/// Method tag for password authentication
pub const AMR_PASSWORD: &str = "pwd";

/// A verified identity: the matched record's fields plus the methods that
/// produced it.
///
/// Serializes as the record's fields followed by `"amr"`; the reserved key
/// takes precedence over a record field of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    attributes: Document,
    auth_methods: Vec<String>,
}

impl Principal {
    pub(crate) fn new(attributes: Document, auth_methods: Vec<String>) -> Self {
        Self {
            attributes,
            auth_methods,
        }
    }

    /// All fields copied from the matched record
    pub fn attributes(&self) -> &Document {
        &self.attributes
    }

    /// A single attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Authentication method tags, in the order they were applied
    pub fn auth_methods(&self) -> &[String] {
        &self.auth_methods
    }

    /// The serialized form as a JSON object
    pub fn to_json(&self) -> Value {
        let mut object = self.attributes.clone();
        object.insert(
            AMR_KEY.to_string(),
            Value::from(self.auth_methods.clone()),
        );
        Value::Object(object)
    }

    /// Give up the attributes
    pub fn into_attributes(self) -> Document {
        self.attributes
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = self.attributes.contains_key(AMR_KEY);
        let len = self.attributes.len() + usize::from(!shadowed);

        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.attributes.iter().filter(|(k, _)| *k != AMR_KEY) {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(AMR_KEY, &self.auth_methods)?;
        map.end()
    }
}
