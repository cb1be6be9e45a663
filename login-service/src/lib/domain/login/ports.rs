use async_trait::async_trait;

use crate::domain::login::errors::ConfigurationError;
use crate::domain::login::errors::ProviderError;
use crate::domain::login::models::LoginRequest;
use crate::domain::login::models::LoginResult;

/// A login method bound to its configuration, ready to serve requests.
#[async_trait]
pub trait LoginProvider: Send + Sync + 'static {
    /// Handle a login request.
    ///
    /// # Arguments
    /// * `request` - Full request body, including the `type` discriminator
    ///
    /// # Returns
    /// Status and optional body to send back to the caller
    ///
    /// # Errors
    /// * `ProviderError` - Internal failure with no defined login outcome
    async fn login(&self, request: &LoginRequest) -> Result<LoginResult, ProviderError>;

    /// Register a new account through this provider.
    ///
    /// # Errors
    /// * `NotImplemented` - Unless the provider overrides it
    async fn signin(&self, _request: &LoginRequest) -> Result<LoginResult, ProviderError> {
        Err(ProviderError::NotImplemented("signin"))
    }

    /// End a session opened through this provider.
    ///
    /// # Errors
    /// * `NotImplemented` - Unless the provider overrides it
    async fn logout(&self, _request: &LoginRequest) -> Result<LoginResult, ProviderError> {
        Err(ProviderError::NotImplemented("logout"))
    }
}

/// Binds provider options into a [`LoginProvider`].
///
/// The options type is part of the factory's signature, so registering a
/// provider with the wrong configuration does not compile. Any
/// `FnOnce(O) -> Result<P, ConfigurationError>` is a factory.
pub trait ProviderFactory<O>: Send + 'static {
    type Provider: LoginProvider;

    /// Consume the options and produce the provider.
    ///
    /// # Errors
    /// * `ConfigurationError` - Options cannot be turned into a working provider
    fn build(self, options: O) -> Result<Self::Provider, ConfigurationError>;
}

impl<O, P, F> ProviderFactory<O> for F
where
    F: FnOnce(O) -> Result<P, ConfigurationError> + Send + 'static,
    P: LoginProvider,
{
    type Provider = P;

    fn build(self, options: O) -> Result<P, ConfigurationError> {
        self(options)
    }
}
