use std::env;

use auth::Algorithm;
use auth::TokenLifetime;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// HMAC secret, or PEM private key for asymmetric algorithms
    pub secret: String,
    #[serde(default)]
    pub expires_in: TokenLifetime,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
}

/// Account served by the in-memory credential store.
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Argon2 PHC string
    pub password_hash: String,
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__EXPIRES_IN=12h overrides jwt.expires_in.
            // Numeric values are parsed, so JWT__EXPIRES_IN=3600 means seconds.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults() {
        let config = parse(
            r#"
            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.expires_in, TokenLifetime::default());
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_full() {
        let config = parse(
            r#"
            [server]
            http_port = 3000

            [jwt]
            secret = "test-secret"
            expires_in = "12h"
            algorithm = "HS512"

            [[users]]
            email = "alice@example.com"
            username = "alice"
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
            "#,
        )
        .unwrap();

        assert_eq!(config.jwt.expires_in.as_seconds(), 12 * 60 * 60);
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_invalid_lifetime() {
        let result = parse(
            r#"
            [server]
            http_port = 3000

            [jwt]
            secret = "test-secret"
            expires_in = "whenever"
            "#,
        );

        assert!(result.is_err());
    }
}
