use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use auth::TokenLifetime;
use http::StatusCode;

use super::models::CredentialRecord;
use super::models::EmailAndPasswordOptions;
use super::models::LoginAttempt;
use super::ports::CredentialLookup;
use crate::domain::login::errors::ConfigurationError;
use crate::domain::login::errors::ProviderError;
use crate::domain::login::models::LoginRequest;
use crate::domain::login::models::LoginResult;
use crate::domain::login::ports::LoginProvider;

/// Body returned when `default_fields` carries a token instead of credentials.
pub const TOKEN_REVALIDATION_UNSUPPORTED: &str =
    "Token revalidation not yet supported on this route";

/// Email and password login.
///
/// Looks the account up through the injected [`CredentialLookup`], checks
/// the password against the stored Argon2 hash and answers with a signed
/// token carrying `{ email, iat, exp }`.
///
/// | Outcome | Status |
/// |---|---|
/// | malformed body | 422, no body |
/// | token instead of credentials | 422, [`TOKEN_REVALIDATION_UNSUPPORTED`] |
/// | lookup failure | 500, no body |
/// | unknown account or wrong password | 400, no body |
/// | match | 200, token |
pub struct EmailAndPasswordLogin {
    credentials: Arc<dyn CredentialLookup>,
    authenticator: Authenticator,
    expires_in: TokenLifetime,
}

/// Provider factory for [`EmailAndPasswordLogin`].
///
/// # Errors
/// * `InvalidSigningKey` - Key is empty or does not fit the algorithm
/// * `InvalidOptions` - The lifetime overflows the token's expiration date, or
///   the password hasher could not prepare its decoy hash
pub fn login_builder(
    options: EmailAndPasswordOptions,
) -> Result<EmailAndPasswordLogin, ConfigurationError> {
    Claims::issued_now(&options.expires_in).map_err(|e| {
        ConfigurationError::InvalidOptions(format!("expires_in {}: {}", options.expires_in, e))
    })?;

    let jwt_handler =
        JwtHandler::with_algorithm(options.secret_or_private_key.as_bytes(), options.algorithm)
            .map_err(|e| ConfigurationError::InvalidSigningKey(e.to_string()))?;

    let authenticator = Authenticator::with_hasher(options.password_hasher, jwt_handler)
        .map_err(|e| ConfigurationError::InvalidOptions(e.to_string()))?;

    Ok(EmailAndPasswordLogin {
        credentials: options.credentials,
        authenticator,
        expires_in: options.expires_in,
    })
}

#[async_trait]
impl LoginProvider for EmailAndPasswordLogin {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResult, ProviderError> {
        let credentials = match LoginAttempt::from_request(request) {
            Ok(LoginAttempt::Credentials(credentials)) => credentials,
            Ok(LoginAttempt::TokenRevalidation(_)) => {
                return Ok(LoginResult::text(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    TOKEN_REVALIDATION_UNSUPPORTED,
                ));
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected email and password login body");
                return Ok(LoginResult::status(StatusCode::UNPROCESSABLE_ENTITY));
            }
        };

        let record = self
            .credentials
            .get_user_login_data(&credentials.identity)
            .await;

        let password_hash = match record {
            CredentialRecord::Found { password_hash } => password_hash,
            CredentialRecord::NotFound => {
                self.authenticator.reject_unknown(&credentials.password);
                tracing::debug!(email = %credentials.identity.email, "Login for unknown account");
                return Ok(LoginResult::status(StatusCode::BAD_REQUEST));
            }
            CredentialRecord::LookupFailure => {
                tracing::error!("Credential lookup failed");
                return Ok(LoginResult::status(StatusCode::INTERNAL_SERVER_ERROR));
            }
        };

        let claims = Claims::issued_now(&self.expires_in)?
            .with_extra("email", credentials.identity.email.as_str());

        match self
            .authenticator
            .authenticate(&credentials.password, &password_hash, &claims)
        {
            Ok(result) => {
                tracing::info!(email = %credentials.identity.email, "Login succeeded");
                Ok(LoginResult::text(StatusCode::OK, result.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(email = %credentials.identity.email, "Login with wrong password");
                Ok(LoginResult::status(StatusCode::BAD_REQUEST))
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }
}
