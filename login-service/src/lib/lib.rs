//! Pluggable login dispatch.
//!
//! Named login providers are registered on a [`LoginHandlerBuilder`], built
//! once into a [`LoginDispatcher`], and selected per request by the body's
//! `type` field. Every provider answers with the same [`LoginResult`]
//! (status and optional body).
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use login_service::domain::login::{LoginHandlerBuilder, LoginRequest};
//! use login_service::domain::providers::email_and_password::{
//!     login_builder, EmailAndPasswordOptions,
//! };
//! use login_service::outbound::InMemoryCredentialStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Arc::new(InMemoryCredentialStore::new());
//! let dispatcher = LoginHandlerBuilder::new()
//!     .add_provider(
//!         "emailAndPassword",
//!         login_builder,
//!         EmailAndPasswordOptions::new("secret_key_at_least_32_bytes_long!", credentials),
//!     )?
//!     .build()?;
//!
//! let result = dispatcher
//!     .dispatch(&LoginRequest::new(serde_json::json!({ "type": "emailAndPassword" })))
//!     .await?;
//! assert_eq!(result.status.as_u16(), 422);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::login::LoginDispatcher;
pub use domain::login::LoginHandlerBuilder;
pub use domain::login::LoginResult;
