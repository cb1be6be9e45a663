use async_trait::async_trait;

use super::models::CredentialRecord;
use super::models::LoginIdentity;

/// Resolves the stored credential for a login identity.
#[async_trait]
pub trait CredentialLookup: Send + Sync + 'static {
    /// Fetch the stored password hash for `identity`.
    ///
    /// # Arguments
    /// * `identity` - Validated email and optional username
    ///
    /// # Returns
    /// * `Found` - Account exists, with its password hash
    /// * `NotFound` - No matching account; never reported as a failure
    /// * `LookupFailure` - The backing store could not answer
    async fn get_user_login_data(&self, identity: &LoginIdentity) -> CredentialRecord;
}
