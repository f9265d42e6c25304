//! # OrbitLens Config
//!
//! Configuration management for OrbitLens: widget display limits, landmark
//! watcher timeout, credentials, enabled sites and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
