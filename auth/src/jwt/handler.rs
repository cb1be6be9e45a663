use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow callers to define their own token payload.
/// HMAC algorithms use the key as a shared secret and can verify what they sign.
/// RSA, ECDSA and EdDSA algorithms take a PEM private key and only sign;
/// their tokens are verified by whoever holds the public key.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: Option<DecodingKey>,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new HS256 JWT handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: Some(DecodingKey::from_secret(secret)),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler signing with `algorithm`.
    ///
    /// # Arguments
    /// * `key` - Shared secret for HS*, PEM private key otherwise
    /// * `algorithm` - Signing algorithm
    ///
    /// # Errors
    /// * `InvalidKey` - Key is empty or not a valid PEM for the algorithm family
    pub fn with_algorithm(key: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        let invalid = |reason: String| JwtError::InvalidKey {
            algorithm: format!("{:?}", algorithm),
            reason,
        };

        if key.is_empty() {
            return Err(invalid("key is empty".to_string()));
        }

        let (encoding_key, decoding_key) = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => (
                EncodingKey::from_secret(key),
                Some(DecodingKey::from_secret(key)),
            ),
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => (
                EncodingKey::from_rsa_pem(key).map_err(|e| invalid(e.to_string()))?,
                None,
            ),
            Algorithm::ES256 | Algorithm::ES384 => (
                EncodingKey::from_ec_pem(key).map_err(|e| invalid(e.to_string()))?,
                None,
            ),
            Algorithm::EdDSA => (
                EncodingKey::from_ed_pem(key).map_err(|e| invalid(e.to_string()))?,
                None,
            ),
        };

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired (if exp claim is present)
    /// * `DecodingFailed` - Signature is invalid, the token is malformed, or
    ///   the handler signs with a private key and cannot verify
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let decoding_key = self
            .decoding_key
            .as_ref()
            .ok_or_else(|| {
                JwtError::DecodingFailed(format!("no verification key for {:?}", self.algorithm))
            })?;

        let mut validation = Validation::new(self.algorithm);
        // Allow tokens without 'exp' claim for flexibility
        validation.required_spec_claims.clear();

        let token_data =
            decode::<T>(token, decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
