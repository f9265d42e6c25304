//! DOM error types.

use thiserror::Error;

use crate::NodeId;

/// DOM operation errors.
#[derive(Debug, Error)]
pub enum DomError {
    /// Selector text could not be parsed.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Node handle does not belong to this document.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Insertion would create a cycle or target a text node.
    #[error("Hierarchy request error: {0}")]
    Hierarchy(String),

    /// Reference node is not a child of the given parent.
    #[error("Node {reference} is not a child of {parent}")]
    NotAChild { parent: NodeId, reference: NodeId },

    /// Snapshot could not be decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Snapshot URL is not absolute.
    #[error("Invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for DomError {
    fn from(e: serde_json::Error) -> Self {
        DomError::Snapshot(format!("JSON error: {}", e))
    }
}
