use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid signing key for {algorithm}: {reason}")]
    InvalidKey { algorithm: String, reason: String },

    #[error("Token expiration is out of range")]
    ExpirationOutOfRange,
}

/// Error type for token lifetime parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifetimeError {
    #[error("Invalid token lifetime: {0:?}")]
    InvalidFormat(String),

    #[error("Unknown time unit: {0:?}")]
    UnknownUnit(String),

    #[error("Token lifetime must be positive, got {0}ms")]
    NotPositive(i64),

    #[error("Token lifetime out of range")]
    OutOfRange,
}
