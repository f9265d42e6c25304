//! Member-data fetch errors.

use thiserror::Error;

/// Failures reaching the member-data collaborator.
///
/// Widgets never surface these to the host page: every variant resolves to
/// the generic error state.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Background service unavailable")]
    Unavailable,
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::InvalidResponse(format!("JSON error: {}", e))
    }
}
