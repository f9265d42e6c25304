//! Runtime errors.

use std::path::PathBuf;

use orbitlens_dom::DomError;
use thiserror::Error;

/// Landmark watcher failures. None of these are fatal to the page: the
/// session just stays inert.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Landmark '{selector}' did not appear within {timeout_ms} ms")]
    LandmarkTimeout { selector: String, timeout_ms: u64 },

    #[error("Document observer closed")]
    ObserverClosed,

    #[error("Invalid landmark selector: {0}")]
    Selector(#[from] DomError),
}

/// Failures reading a member-data fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fixture: {0}")]
    Parse(#[from] serde_json::Error),
}
