use std::sync::Arc;

use login_service::config::Config;
use login_service::domain::login::LoginHandlerBuilder;
use login_service::domain::providers::email_and_password::login_builder;
use login_service::domain::providers::email_and_password::EmailAndPasswordOptions;
use login_service::inbound::http::router::create_router;
use login_service::outbound::InMemoryCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "login-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        algorithm = ?config.jwt.algorithm,
        expires_in = %config.jwt.expires_in,
        users = config.users.len(),
        "Configuration loaded"
    );

    let credentials = Arc::new(InMemoryCredentialStore::from_config(&config.users));
    if credentials.is_empty() {
        tracing::warn!("No users configured, every login will be rejected");
    }

    let options = EmailAndPasswordOptions::new(config.jwt.secret.clone(), credentials)
        .with_expires_in(config.jwt.expires_in)
        .with_algorithm(config.jwt.algorithm);

    let dispatcher = LoginHandlerBuilder::new()
        .add_provider("emailAndPassword", login_builder, options)?
        .build()?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(dispatcher)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
