use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;

use crate::domain::login::errors::ProviderError;
use crate::domain::login::models::LoginRequest;
use crate::domain::login::models::LoginResult;
use crate::domain::login::models::ProviderName;
use crate::domain::login::ports::LoginProvider;

/// Message returned when the request carries no `type` field.
pub const PROVIDER_NOT_SPECIFIED: &str = "Authentication Provider not specified";

/// Routes each login request to the provider named by its `type` field.
///
/// Immutable once built; clones share the same providers.
#[derive(Clone)]
pub struct LoginDispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    providers: HashMap<String, Arc<dyn LoginProvider>>,
    names: Vec<ProviderName>,
    not_found_message: String,
}

impl LoginDispatcher {
    pub(crate) fn new(built: Vec<(ProviderName, Arc<dyn LoginProvider>)>) -> Self {
        let names: Vec<ProviderName> = built.iter().map(|(name, _)| name.clone()).collect();
        let not_found_message = not_found_message(&names);
        let providers = built
            .into_iter()
            .map(|(name, provider)| (name.as_str().to_string(), provider))
            .collect();

        Self {
            inner: Arc::new(DispatcherInner {
                providers,
                names,
                not_found_message,
            }),
        }
    }

    /// Registered names, in registration order.
    pub fn provider_names(&self) -> &[ProviderName] {
        &self.inner.names
    }

    /// Body sent when `type` names no registered provider.
    pub fn not_found_message(&self) -> &str {
        &self.inner.not_found_message
    }

    /// Handle one login request.
    ///
    /// # Returns
    /// * `422` with [`PROVIDER_NOT_SPECIFIED`] when `type` is missing
    /// * `422` with the list of registered providers when `type` matches none
    /// * Otherwise the selected provider's result, unchanged
    ///
    /// # Errors
    /// * `ProviderError` - Propagated untouched from the selected provider
    pub async fn dispatch(&self, request: &LoginRequest) -> Result<LoginResult, ProviderError> {
        let Some(provider_type) = request.provider_type() else {
            tracing::debug!("Login request without provider type");
            return Ok(LoginResult::text(
                StatusCode::UNPROCESSABLE_ENTITY,
                PROVIDER_NOT_SPECIFIED,
            ));
        };

        let Some((name, provider)) = provider_type
            .as_str()
            .and_then(|name| self.inner.providers.get_key_value(name))
        else {
            tracing::debug!(provider = %provider_type, "Login request for unknown provider");
            return Ok(LoginResult::text(
                StatusCode::UNPROCESSABLE_ENTITY,
                self.inner.not_found_message.clone(),
            ));
        };

        let result = provider.login(request).await?;
        tracing::debug!(
            provider = %name,
            status = result.status.as_u16(),
            "Login request handled"
        );

        Ok(result)
    }
}

impl fmt::Debug for LoginDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDispatcher")
            .field("providers", &self.inner.names)
            .finish()
    }
}

fn not_found_message(names: &[ProviderName]) -> String {
    let defined = names
        .iter()
        .map(ProviderName::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!("Provider not specified. Those are the providers already defined: {defined}")
}
