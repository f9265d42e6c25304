//! DOM node storage: handles, kinds and per-node tree links.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a node inside a [`Document`](crate::Document).
///
/// Handles stay valid after the node is detached, so late callbacks can
/// still address an element the page has already dropped. Once the subtree
/// is released its handles stop resolving; the slot's generation changes,
/// so a reused slot never answers to an old handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw arena index. Reused after the node is released.
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "node_{}", self.index)
        } else {
            write!(f, "node_{}g{}", self.index, self.generation)
        }
    }
}

/// Arena slot. `node` is `None` while the slot sits on the free list.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}

/// Element or text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        /// Tag name (lowercase).
        tag_name: String,
        /// Attributes in insertion order.
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

/// A node plus its links into the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn element(tag_name: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag_name: tag_name.to_ascii_lowercase(),
                attributes: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text(text.to_string()),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Tag name, `None` for text nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag_name, .. } => Some(tag_name),
            NodeKind::Text(_) => None,
        }
    }

    /// Attribute value by (case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Text(_) => &[],
        }
    }

    /// Whitespace-separated class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
