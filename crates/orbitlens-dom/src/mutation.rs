//! Mutation records emitted by document edits.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// What changed on the target node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum MutationKind {
    /// Children were added or removed.
    ChildList,
    /// The named attribute changed.
    Attribute(String),
    /// A text node's data changed.
    CharacterData,
}

/// A single change, delivered to observers after the edit completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub target: NodeId,
    pub kind: MutationKind,
}

impl MutationRecord {
    pub fn child_list(target: NodeId) -> Self {
        Self {
            target,
            kind: MutationKind::ChildList,
        }
    }

    pub fn attribute(target: NodeId, name: impl Into<String>) -> Self {
        Self {
            target,
            kind: MutationKind::Attribute(name.into()),
        }
    }

    pub fn character_data(target: NodeId) -> Self {
        Self {
            target,
            kind: MutationKind::CharacterData,
        }
    }
}
