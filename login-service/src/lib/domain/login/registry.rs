use std::fmt;
use std::sync::Arc;

use crate::domain::login::dispatcher::LoginDispatcher;
use crate::domain::login::errors::ConfigurationError;
use crate::domain::login::models::ProviderName;
use crate::domain::login::ports::LoginProvider;
use crate::domain::login::ports::ProviderFactory;

type BindProvider = Box<dyn FnOnce() -> Result<Arc<dyn LoginProvider>, ConfigurationError> + Send>;

/// A registered provider whose factory has not run yet.
struct ProviderEntry {
    name: ProviderName,
    bind: BindProvider,
}

/// Accumulates named providers and builds them into a [`LoginDispatcher`].
///
/// Each `add_provider` consumes the builder and hands back the extended one,
/// and `build` consumes it for good.
///
/// ```
/// use login_service::domain::login::LoginHandlerBuilder;
///
/// assert!(LoginHandlerBuilder::new().build().is_err());
/// ```
#[derive(Default)]
pub struct LoginHandlerBuilder {
    entries: Vec<ProviderEntry>,
}

impl LoginHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `name`.
    ///
    /// The factory is not invoked until [`build`](Self::build).
    ///
    /// # Arguments
    /// * `name` - Value of the request `type` field selecting this provider
    /// * `factory` - Turns `options` into the provider
    /// * `options` - Provider configuration, typed by the factory
    ///
    /// # Errors
    /// * `EmptyProviderName` - `name` is empty
    /// * `DuplicateProvider` - `name` is already registered
    pub fn add_provider<O, F>(
        mut self,
        name: impl Into<String>,
        factory: F,
        options: O,
    ) -> Result<Self, ConfigurationError>
    where
        O: Send + 'static,
        F: ProviderFactory<O>,
    {
        let name = ProviderName::new(name)?;

        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(ConfigurationError::DuplicateProvider(name.to_string()));
        }

        let bind: BindProvider = Box::new(move || {
            let provider = factory.build(options)?;
            Ok(Arc::new(provider) as Arc<dyn LoginProvider>)
        });

        self.entries.push(ProviderEntry { name, bind });
        Ok(self)
    }

    /// Registered names, in registration order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Bind every provider to its options and produce the dispatcher.
    ///
    /// Each factory runs exactly once.
    ///
    /// # Errors
    /// * `NoProviders` - Nothing was registered
    /// * `ConfigurationError` - A factory rejected its options
    pub fn build(self) -> Result<LoginDispatcher, ConfigurationError> {
        if self.entries.is_empty() {
            return Err(ConfigurationError::NoProviders);
        }

        let mut providers = Vec::with_capacity(self.entries.len());
        for ProviderEntry { name, bind } in self.entries {
            let provider = bind().inspect_err(|e| {
                tracing::error!(provider = %name, error = %e, "Failed to build login provider");
            })?;
            tracing::debug!(provider = %name, "Login provider built");
            providers.push((name, provider));
        }

        let dispatcher = LoginDispatcher::new(providers);
        tracing::info!(
            providers = ?dispatcher.provider_names(),
            "Login dispatcher ready"
        );

        Ok(dispatcher)
    }
}

impl fmt::Debug for LoginHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginHandlerBuilder")
            .field("providers", &self.provider_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use http::StatusCode;

    use super::*;
    use crate::domain::login::errors::ProviderError;
    use crate::domain::login::models::LoginRequest;
    use crate::domain::login::models::LoginResult;

    struct FixedProvider {
        status: StatusCode,
    }

    #[async_trait]
    impl LoginProvider for FixedProvider {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginResult, ProviderError> {
            Ok(LoginResult::status(self.status))
        }
    }

    fn fixed(status: StatusCode) -> Result<FixedProvider, ConfigurationError> {
        Ok(FixedProvider { status })
    }

    #[test]
    fn test_build_with_zero_providers() {
        let result = LoginHandlerBuilder::new().build();
        assert_eq!(result.unwrap_err(), ConfigurationError::NoProviders);
    }

    #[test]
    fn test_add_provider_keeps_order() {
        let builder = LoginHandlerBuilder::new()
            .add_provider("first", fixed, StatusCode::OK)
            .unwrap()
            .add_provider("second", fixed, StatusCode::BAD_REQUEST)
            .unwrap();

        assert_eq!(builder.provider_names(), vec!["first", "second"]);

        let dispatcher = builder.build().unwrap();
        let names: Vec<&str> = dispatcher
            .provider_names()
            .iter()
            .map(ProviderName::as_str)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_add_provider_rejects_duplicate_name() {
        let result = LoginHandlerBuilder::new()
            .add_provider("emailAndPassword", fixed, StatusCode::OK)
            .unwrap()
            .add_provider("emailAndPassword", fixed, StatusCode::BAD_REQUEST);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::DuplicateProvider("emailAndPassword".to_string())
        );
    }

    #[test]
    fn test_add_provider_rejects_empty_name() {
        let result = LoginHandlerBuilder::new().add_provider("", fixed, StatusCode::OK);
        assert_eq!(result.unwrap_err(), ConfigurationError::EmptyProviderName);
    }

    #[test]
    fn test_factories_run_once_at_build() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let builder = LoginHandlerBuilder::new()
            .add_provider(
                "counted",
                move |status: StatusCode| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    fixed(status)
                },
                StatusCode::OK,
            )
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        builder.build().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_factory_failure_fails_build() {
        let result = LoginHandlerBuilder::new()
            .add_provider("ok", fixed, StatusCode::OK)
            .unwrap()
            .add_provider(
                "broken",
                |_: ()| -> Result<FixedProvider, ConfigurationError> {
                    Err(ConfigurationError::InvalidSigningKey("key is empty".to_string()))
                },
                (),
            )
            .unwrap()
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigurationError::InvalidSigningKey(_)
        ));
    }
}
