pub mod claims;
pub mod errors;
pub mod handler;
pub mod lifetime;

pub use claims::Claims;
pub use errors::JwtError;
pub use errors::LifetimeError;
pub use handler::JwtHandler;
pub use lifetime::TokenLifetime;
