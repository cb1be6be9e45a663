use thiserror::Error;

/// Error raised while composing providers into a dispatcher.
///
/// Always a programming error in the composition code; nothing here is
/// recoverable at request time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Can't build login handler with zero providers defined")]
    NoProviders,

    #[error("Provider already defined: {0}")]
    DuplicateProvider(String),

    #[error("Provider name must not be empty")]
    EmptyProviderName,

    #[error("Invalid signing key: {0}")]
    InvalidSigningKey(String),

    #[error("Invalid provider options: {0}")]
    InvalidOptions(String),
}

/// Failure inside a provider that has no defined login outcome.
///
/// The dispatcher never converts these into a status; they surface to the
/// transport layer as-is.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Operation not implemented by this provider: {0}")]
    NotImplemented(&'static str),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("JWT error: {0}")]
    Jwt(#[from] auth::JwtError),
}
