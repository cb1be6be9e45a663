use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::lifetime::TokenLifetime;

/// Generic JWT claims structure.
///
/// Registered time claims plus arbitrary custom fields via the flattened
/// `extra` map. Login tokens carry `{ email, iat, exp }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims issued now and expiring after `lifetime`.
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - `lifetime` reaches past the last representable date
    pub fn issued_now(lifetime: &TokenLifetime) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(lifetime.as_duration())
            .ok_or(JwtError::ExpirationOutOfRange)?;

        Ok(Self::new()
            .with_issued_at(now.timestamp())
            .with_expiration(expiration.timestamp()))
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Email address the token was issued for.
    pub fn email(&self) -> Option<&str> {
        self.extra.get("email").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_now() {
        let lifetime: TokenLifetime = "2h".parse().unwrap();
        let claims = Claims::issued_now(&lifetime)
            .unwrap()
            .with_extra("email", "alice@example.com");

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 2 * 60 * 60);
        assert_eq!(claims.email(), Some("alice@example.com"));
    }

    #[test]
    fn test_serialized_shape() {
        let claims = Claims::new()
            .with_issued_at(1_700_000_000)
            .with_expiration(1_700_086_400)
            .with_extra("email", "alice@example.com");

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "email": "alice@example.com",
                "iat": 1_700_000_000,
                "exp": 1_700_086_400,
            })
        );
    }

    #[test]
    fn test_issued_now_out_of_range() {
        let lifetime: TokenLifetime = "1000000y".parse().unwrap();

        assert!(matches!(
            Claims::issued_now(&lifetime),
            Err(JwtError::ExpirationOutOfRange)
        ));
    }
}
