use std::fmt;
use std::sync::Arc;

use auth::Algorithm;
use auth::PasswordHasher;
use auth::TokenLifetime;
use email_address::Options;
use serde::Deserialize;
use serde::Deserializer;
use thiserror::Error;

use super::ports::CredentialLookup;
use crate::domain::login::models::LoginRequest;

/// Why a login body was rejected before any lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed login body: {0}")]
    Malformed(String),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Username must not be empty when present")]
    EmptyUsername,

    #[error("Token must not be empty")]
    EmptyToken,
}

/// Email address type
///
/// A bare `local@domain.tld` address: display names, domain literals,
/// quoted local parts and dotless hosts are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is not a plain address with a top-level domain
    pub fn new(email: String) -> Result<Self, ValidationError> {
        let options = Options::default()
            .without_display_text()
            .without_domain_literal()
            .with_required_tld();

        let parsed = email_address::EmailAddress::parse_with_options(&email, options)
            .map_err(|e| ValidationError::InvalidEmail(e.to_string()))?;
        if parsed.local_part().starts_with('"') {
            return Err(ValidationError::InvalidEmail("quoted local part".to_string()));
        }

        Ok(EmailAddress(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who is trying to log in: the key handed to the credential lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentity {
    pub email: EmailAddress,
    pub username: Option<String>,
}

/// Validated email and password login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: LoginIdentity,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What an email-and-password request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAttempt {
    Credentials(Credentials),
    /// `default_fields` carried a previously issued token.
    TokenRevalidation(String),
}

#[derive(Deserialize)]
struct EmailAndPasswordBody {
    default_fields: DefaultFields,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefaultFields {
    Credentials {
        email: String,
        #[serde(default, deserialize_with = "present_string")]
        username: Option<String>,
        password: String,
    },
    Token(String),
}

/// `username` may be absent but not `null`.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl LoginAttempt {
    /// Decode and validate a request body.
    ///
    /// Accepts `{ default_fields: { email, username?, password } }` or
    /// `{ default_fields: "<token>" }`. Other fields are ignored.
    ///
    /// # Errors
    /// * `ValidationError` - Body does not have either shape, or a field is invalid
    pub fn from_request(request: &LoginRequest) -> Result<Self, ValidationError> {
        let body: EmailAndPasswordBody = request
            .decode()
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;

        match body.default_fields {
            DefaultFields::Token(token) => {
                if token.is_empty() {
                    return Err(ValidationError::EmptyToken);
                }
                Ok(LoginAttempt::TokenRevalidation(token))
            }
            DefaultFields::Credentials {
                email,
                username,
                password,
            } => {
                let email = EmailAddress::new(email)?;
                if password.is_empty() {
                    return Err(ValidationError::EmptyPassword);
                }
                if username.as_deref().is_some_and(str::is_empty) {
                    return Err(ValidationError::EmptyUsername);
                }

                Ok(LoginAttempt::Credentials(Credentials {
                    identity: LoginIdentity { email, username },
                    password,
                }))
            }
        }
    }
}

/// Outcome of a credential lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialRecord {
    /// The account exists; carries its stored password hash.
    Found { password_hash: String },
    /// No such account.
    NotFound,
    /// The backing store could not answer.
    LookupFailure,
}

impl CredentialRecord {
    /// Build a record from the `{ success, password?, databaseFailure? }` triple.
    ///
    /// A successful lookup without a password is treated as a lookup failure.
    pub fn from_parts(
        success: bool,
        password: Option<String>,
        database_failure: Option<bool>,
    ) -> Self {
        match (success, password, database_failure.unwrap_or(false)) {
            (_, _, true) => CredentialRecord::LookupFailure,
            (true, Some(password_hash), false) => CredentialRecord::Found { password_hash },
            (true, None, false) => CredentialRecord::LookupFailure,
            (false, _, false) => CredentialRecord::NotFound,
        }
    }
}

/// Configuration of the email-and-password provider.
#[derive(Clone)]
pub struct EmailAndPasswordOptions {
    /// HMAC secret, or PEM private key for asymmetric algorithms.
    pub secret_or_private_key: String,
    pub expires_in: TokenLifetime,
    pub algorithm: Algorithm,
    pub credentials: Arc<dyn CredentialLookup>,
    /// Should match the cost of the stored hashes, so unknown accounts take
    /// as long to reject as wrong passwords.
    pub password_hasher: PasswordHasher,
}

impl EmailAndPasswordOptions {
    /// Options with a one day lifetime, HS256 and default Argon2 cost.
    pub fn new(
        secret_or_private_key: impl Into<String>,
        credentials: Arc<dyn CredentialLookup>,
    ) -> Self {
        Self {
            secret_or_private_key: secret_or_private_key.into(),
            expires_in: TokenLifetime::default(),
            algorithm: Algorithm::HS256,
            credentials,
            password_hasher: PasswordHasher::new(),
        }
    }

    pub fn with_expires_in(mut self, expires_in: TokenLifetime) -> Self {
        self.expires_in = expires_in;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }
}

impl fmt::Debug for EmailAndPasswordOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailAndPasswordOptions")
            .field("secret_or_private_key", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
