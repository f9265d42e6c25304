//! Site registry errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Site integration not found: {0}")]
    NotFound(String),

    #[error("Site integration already registered: {0}")]
    AlreadyRegistered(String),

    #[error("No site integration handles host: {0}")]
    UnsupportedHost(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}
