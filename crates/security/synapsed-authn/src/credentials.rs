//! Credentials supplied for a single authentication attempt

use crate::{Error, FieldMapping, Result};
use serde_json::Value;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// JSON key that marks bearer-token credentials
const TOKEN_FIELD: &str = "token";

/// The closed set of credential kinds callers can present
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Identifier and secret
    Password(PasswordCredentials),
    /// Opaque bearer token
    Token(TokenCredentials),
}

impl Credentials {
    /// Identifier/secret credentials
    pub fn password(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials::Password(PasswordCredentials::new(identifier, secret))
    }

    /// Bearer token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token(TokenCredentials::new(token))
    }

    /// Short name of the variant, used in error messages and logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Credentials::Password(_) => "password",
            Credentials::Token(_) => "token",
        }
    }

    /// Read credentials from a JSON object.
    ///
    /// Identifier and secret are taken from the mapping's credential fields.
    /// An object with a `token` key and no identifier is read as a token.
    pub fn from_json(value: &Value, mapping: &FieldMapping) -> Result<Self> {
        let object = match value {
            Value::Null => {
                return Err(Error::InvalidInput(
                    "credentials must be set for authentication".into(),
                ))
            }
            Value::Object(object) => object,
            _ => return Err(Error::InvalidInput("credentials must be a JSON object".into())),
        };

        let identifier_field = mapping.credential_identifier_field();
        if !object.contains_key(identifier_field) {
            if let Some(token) = object.get(TOKEN_FIELD) {
                let token = token
                    .as_str()
                    .ok_or_else(|| Error::InvalidInput("token must be a string".into()))?;
                return Ok(Credentials::token(token));
            }
        }

        let identifier = string_field(object, identifier_field)?;
        let secret = string_field(object, mapping.credential_secret_field())?;
        Ok(Credentials::password(identifier, secret))
    }
}

impl From<PasswordCredentials> for Credentials {
    fn from(credentials: PasswordCredentials) -> Self {
        Credentials::Password(credentials)
    }
}

impl From<TokenCredentials> for Credentials {
    fn from(credentials: TokenCredentials) -> Self {
        Credentials::Token(credentials)
    }
}

fn string_field<'a>(object: &'a serde_json::Map<String, Value>, field: &str) -> Result<&'a str> {
    match object.get(field) {
        None | Some(Value::Null) => Err(Error::InvalidInput(format!(
            "credentials are missing '{field}'"
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::InvalidInput(format!("'{field}' must be a string"))),
    }
}

/// Identifier and secret; the secret is wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PasswordCredentials {
    identifier: String,
    secret: String,
}

impl PasswordCredentials {
    /// Create new credentials
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// The identifier, e.g. a username
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The secret in clear text
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Both parts must be present and non-empty
    pub fn check_valid(&self) -> Result<()> {
        if self.identifier.is_empty() {
            return Err(Error::InvalidInput("identifier cannot be empty".into()));
        }
        if self.secret.is_empty() {
            return Err(Error::InvalidInput("secret cannot be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Opaque bearer token
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenCredentials {
    token: String,
}

impl TokenCredentials {
    /// Create new token credentials
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
