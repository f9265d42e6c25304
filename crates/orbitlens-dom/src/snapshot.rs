//! JSON page snapshots.
//!
//! ```json
//! {
//!   "url": "https://github.com/org/repo/issues/36",
//!   "root": { "tag": "html", "children": [
//!     { "tag": "body", "children": [
//!       { "tag": "a", "attrs": { "class": "author" }, "children": [ { "text": "octocat" } ] }
//!     ] }
//!   ] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Document, DomError, NodeId, NodeKind};

/// Serialized page: location plus element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub root: SnapshotNode,
}

/// Serialized node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    Text {
        text: String,
    },
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<SnapshotNode>,
    },
}

impl SnapshotNode {
    pub fn element(tag: impl Into<String>) -> Self {
        SnapshotNode::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        SnapshotNode::Text { text: text.into() }
    }

    /// Builder: set an attribute. No-op on text nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let SnapshotNode::Element { ref mut attrs, .. } = self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    /// Builder: shorthand for `attr("class", ..)`.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Builder: append a child. No-op on text nodes.
    pub fn child(mut self, child: SnapshotNode) -> Self {
        if let SnapshotNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    /// Builder: append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(SnapshotNode::text(text))
    }
}

impl PageSnapshot {
    /// `<html>` with an optional `<title>` in `<head>` and the given body children.
    pub fn with_body(
        url: impl Into<String>,
        title: Option<&str>,
        body: Vec<SnapshotNode>,
    ) -> Self {
        let mut head = SnapshotNode::element("head");
        if let Some(title) = title {
            head = head.child(SnapshotNode::element("title").with_text(title));
        }
        let body = body
            .into_iter()
            .fold(SnapshotNode::element("body"), SnapshotNode::child);

        Self {
            url: url.into(),
            root: SnapshotNode::element("html").child(head).child(body),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DomError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, DomError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomError::Snapshot(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, DomError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a live-ready document from this snapshot.
    pub fn into_document(&self) -> Result<Document, DomError> {
        let SnapshotNode::Element {
            tag,
            attrs,
            children,
        } = &self.root
        else {
            return Err(DomError::Snapshot("root must be an element".to_string()));
        };

        let mut doc = Document::with_root(Url::parse(&self.url)?, tag);
        let root = doc.document_element();
        for (name, value) in attrs {
            doc.set_attribute(root, name, value)?;
        }
        for child in children {
            doc.append_snapshot(root, child)?;
        }
        doc.take_records();
        Ok(doc)
    }

    /// Serialize a document, detached nodes excluded.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            url: doc.location().to_string(),
            root: doc.to_snapshot(doc.document_element()),
        }
    }
}

impl Document {
    /// Materialize `node` and append it under `parent`.
    pub fn append_snapshot(
        &mut self,
        parent: NodeId,
        node: &SnapshotNode,
    ) -> Result<NodeId, DomError> {
        let id = self.build_snapshot(node)?;
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn build_snapshot(&mut self, node: &SnapshotNode) -> Result<NodeId, DomError> {
        match node {
            SnapshotNode::Text { text } => Ok(self.create_text(text)),
            SnapshotNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.create_element(tag);
                for (name, value) in attrs {
                    self.set_attribute(id, name, value)?;
                }
                for child in children {
                    let child_id = self.build_snapshot(child)?;
                    self.append_child(id, child_id)?;
                }
                Ok(id)
            }
        }
    }

    /// Serialize the subtree rooted at `id`.
    pub fn to_snapshot(&self, id: NodeId) -> SnapshotNode {
        match self.node(id).map(|n| n.kind()) {
            Some(NodeKind::Text(text)) => SnapshotNode::text(text.clone()),
            Some(NodeKind::Element {
                tag_name,
                attributes,
            }) => SnapshotNode::Element {
                tag: tag_name.clone(),
                attrs: attributes.iter().cloned().collect(),
                children: self
                    .children(id)
                    .iter()
                    .map(|c| self.to_snapshot(*c))
                    .collect(),
            },
            None => SnapshotNode::text(String::new()),
        }
    }
}
