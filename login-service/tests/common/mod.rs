use std::sync::Arc;

use auth::JwtHandler;
use auth::PasswordHasher;
use login_service::domain::login::LoginHandlerBuilder;
use login_service::domain::providers::email_and_password::login_builder;
use login_service::domain::providers::email_and_password::EmailAndPasswordOptions;
use login_service::inbound::http::router::create_router;
use login_service::outbound::InMemoryCredentialStore;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const EMAIL: &str = "alice@example.com";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "some_really_strong_password_xdd";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application with a single `emailAndPassword` provider
    pub async fn spawn() -> Self {
        Self::spawn_with(|builder, options| {
            builder
                .add_provider("emailAndPassword", login_builder, options)
                .expect("Failed to register provider")
        })
        .await
    }

    /// Spawn the application with a custom provider registration
    pub async fn spawn_with<F>(register: F) -> Self
    where
        F: FnOnce(LoginHandlerBuilder, EmailAndPasswordOptions) -> LoginHandlerBuilder,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = cheap_hasher();
        let password_hash = hasher.hash(PASSWORD).expect("Failed to hash password");
        let credentials = Arc::new(InMemoryCredentialStore::new().with_user(
            EMAIL,
            Some(USERNAME.to_string()),
            password_hash,
        ));

        let options =
            EmailAndPasswordOptions::new(JWT_SECRET, credentials).with_password_hasher(hasher);
        let dispatcher = register(LoginHandlerBuilder::new(), options)
            .build()
            .expect("Failed to build login dispatcher");

        let router = create_router(dispatcher);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET.as_bytes()),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// POST a JSON body to the login route
    pub async fn login(&self, body: serde_json::Value) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(8 * 1024, 1, 1).expect("Valid parameters")
}
