use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds a decoy hash so that rejecting an unknown account costs the same
/// Argon2 work as rejecting a wrong password.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

const DECOY_PASSWORD: &str = "decoy-password-never-matches";

impl Authenticator {
    /// Create an authenticator signing with `jwt_handler`.
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed
    pub fn new(jwt_handler: JwtHandler) -> Result<Self, PasswordError> {
        Self::with_hasher(PasswordHasher::new(), jwt_handler)
    }

    /// Create an authenticator with a custom password hasher.
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        jwt_handler: JwtHandler,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler,
            decoy_hash,
        })
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Spend the work of one password verification on an account that does
    /// not exist, so the caller cannot tell it apart from a wrong password
    /// by timing.
    pub fn reject_unknown(&self, password: &str) {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token<T: for<'de> serde::Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
