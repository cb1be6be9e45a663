//! Authentication utilities library
//!
//! Cryptographic building blocks for login providers:
//! - Password hashing and verification (Argon2id)
//! - JWT signing and validation with a configurable algorithm
//! - Token lifetimes parsed from short duration strings (`"1d"`, `"12h"`)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler, TokenLifetime};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let lifetime: TokenLifetime = "1d".parse().unwrap();
//! let claims = Claims::issued_now(&lifetime).unwrap().with_extra("email", "alice@example.com");
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.email(), Some("alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, JwtHandler, PasswordHasher};
//!
//! let auth = Authenticator::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!")).unwrap();
//! let hash = PasswordHasher::new().hash("password123").unwrap();
//!
//! let claims = Claims::new().with_extra("email", "alice@example.com");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::LifetimeError;
pub use jwt::TokenLifetime;
pub use password::PasswordError;
pub use password::PasswordHasher;
