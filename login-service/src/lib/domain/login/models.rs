use std::fmt;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::domain::login::errors::ConfigurationError;

/// Name a provider is registered and selected under.
///
/// Non-empty; compared verbatim against the request's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderName(String);

impl ProviderName {
    /// Create a new provider name.
    ///
    /// # Errors
    /// * `EmptyProviderName` - Name is empty or whitespace only
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyProviderName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw login request body.
///
/// Providers decode their own shape from it; the dispatcher only reads `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginRequest(Value);

impl LoginRequest {
    pub const DISCRIMINATOR: &'static str = "type";

    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    /// The `type` field, if the body is an object carrying one.
    pub fn provider_type(&self) -> Option<&Value> {
        self.0.as_object()?.get(Self::DISCRIMINATOR)
    }

    /// Decode the body into a provider-specific shape.
    ///
    /// # Errors
    /// * `serde_json::Error` - Body does not match `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.clone())
    }
}

impl From<Value> for LoginRequest {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

/// Body of a login result.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginBody {
    Text(String),
    Json(Map<String, Value>),
}

/// Uniform outcome of every provider.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResult {
    pub status: StatusCode,
    pub body: Option<LoginBody>,
}

impl LoginResult {
    /// Result with a status and no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(LoginBody::Text(body.into())),
        }
    }

    pub fn json(status: StatusCode, body: Map<String, Value>) -> Self {
        Self {
            status,
            body: Some(LoginBody::Json(body)),
        }
    }

    /// Text body, if any.
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Some(LoginBody::Text(text)) => Some(text),
            _ => None,
        }
    }
}
