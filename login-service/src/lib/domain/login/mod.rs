pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod ports;
pub mod registry;

pub use dispatcher::LoginDispatcher;
pub use dispatcher::PROVIDER_NOT_SPECIFIED;
pub use errors::ConfigurationError;
pub use errors::ProviderError;
pub use models::LoginBody;
pub use models::LoginRequest;
pub use models::LoginResult;
pub use models::ProviderName;
pub use ports::LoginProvider;
pub use ports::ProviderFactory;
pub use registry::LoginHandlerBuilder;
