//! Credential resolution for external services.

pub mod env;

pub use env::ServiceCredentials;
