pub mod login;
pub mod providers;
