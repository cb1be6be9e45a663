use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::UserConfig;
use crate::domain::providers::email_and_password::CredentialLookup;
use crate::domain::providers::email_and_password::CredentialRecord;
use crate::domain::providers::email_and_password::LoginIdentity;

#[derive(Debug, Clone)]
struct StoredCredential {
    username: Option<String>,
    password_hash: String,
}

/// Read-only credential lookup backed by a map built at startup.
///
/// Emails are matched case-insensitively. When the login names a username,
/// it must match the stored one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: HashMap<String, StoredCredential>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account. A later entry for the same email replaces the earlier one.
    pub fn with_user(
        mut self,
        email: &str,
        username: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        self.credentials.insert(
            email.to_lowercase(),
            StoredCredential {
                username,
                password_hash: password_hash.into(),
            },
        );
        self
    }

    /// Build a store from configured users.
    pub fn from_config(users: &[UserConfig]) -> Self {
        users.iter().fold(Self::new(), |store, user| {
            store.with_user(&user.email, user.username.clone(), &user.password_hash)
        })
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[async_trait]
impl CredentialLookup for InMemoryCredentialStore {
    async fn get_user_login_data(&self, identity: &LoginIdentity) -> CredentialRecord {
        let Some(stored) = self
            .credentials
            .get(&identity.email.as_str().to_lowercase())
        else {
            return CredentialRecord::NotFound;
        };

        match (&identity.username, &stored.username) {
            (Some(requested), Some(username)) if requested != username => {
                CredentialRecord::NotFound
            }
            (Some(_), None) => CredentialRecord::NotFound,
            _ => CredentialRecord::Found {
                password_hash: stored.password_hash.clone(),
            },
        }
    }
}
