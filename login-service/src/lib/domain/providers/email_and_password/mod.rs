pub mod models;
pub mod ports;
pub mod provider;

pub use models::CredentialRecord;
pub use models::Credentials;
pub use models::EmailAddress;
pub use models::EmailAndPasswordOptions;
pub use models::LoginAttempt;
pub use models::LoginIdentity;
pub use models::ValidationError;
pub use ports::CredentialLookup;
pub use provider::login_builder;
pub use provider::EmailAndPasswordLogin;
pub use provider::TOKEN_REVALIDATION_UNSUPPORTED;
