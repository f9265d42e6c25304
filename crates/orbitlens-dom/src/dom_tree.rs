//! Document: arena-backed tree operations, attribute access and queries.

use url::Url;

use crate::dom_node::Slot;
use crate::{DomError, InlineStyle, MutationRecord, Node, NodeId, NodeKind, Selector};

/// A host page: location plus an element tree rooted at `<html>`.
///
/// `remove` detaches a subtree; its handles keep resolving so callbacks
/// that outlive a re-render stay harmless. `release` frees a detached
/// subtree for reuse once nothing will touch it again.
#[derive(Debug, Clone)]
pub struct Document {
    location: Url,
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    records: Vec<MutationRecord>,
}

impl Document {
    /// Create an empty `<html><head></head><body></body></html>` page.
    pub fn new(location: Url) -> Self {
        let mut doc = Self::with_root(location, "html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        let root = doc.root;
        for child in [head, body] {
            if let Some(node) = doc.slot_node_mut(child) {
                node.parent = Some(root);
            }
        }
        if let Some(node) = doc.slot_node_mut(root) {
            node.children = vec![head, body];
        }
        doc
    }

    /// Parse `location` and create an empty page.
    pub fn parse_url(location: &str) -> Result<Self, DomError> {
        Ok(Self::new(Url::parse(location)?))
    }

    /// Create a document whose root element has the given tag and no children.
    pub(crate) fn with_root(location: Url, root_tag: &str) -> Self {
        Self {
            location,
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::element(root_tag)),
            }],
            free: Vec::new(),
            root: NodeId::new(0, 0),
            records: Vec::new(),
        }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Client-side navigation: the URL changes, the tree does not.
    pub fn set_location(&mut self, location: Url) {
        self.location = location;
    }

    /// Location path, e.g. `/org/repo/issues/36`.
    pub fn path(&self) -> &str {
        self.location.path()
    }

    /// Location hash including the leading `#`, or `""`.
    pub fn hash(&self) -> String {
        match self.location.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
            _ => String::new(),
        }
    }

    pub fn document_element(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "body")
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.tag_name(*c) == Some(tag))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn slot_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.slot_node_mut(id).ok_or(DomError::UnknownNode(id))
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        self.node(id).map(|_| ()).ok_or(DomError::UnknownNode(id))
    }

    /// Live nodes, attached or detached. Released nodes are not counted.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Arena slots allocated so far, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(self.slots.len() - 1, 0)
            }
        }
    }

    // ------------------------------------------------------------------
    // Creation and structure
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(Node::element(tag_name))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(Node::text(text))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).iter().copied().find(|c| self.is_element(*c))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_element)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// Strict descendants in document (pre-)order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Inclusive containment: `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is attached under the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let first = self.first_child(parent);
        self.insert_before(parent, child, first)
    }

    /// Insert `child` before `reference`, or at the end when `reference` is `None`.
    /// A child that already has a parent is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if !self.is_element(parent) {
            return Err(DomError::Hierarchy(format!("{} is not an element", parent)));
        }
        if self.contains(child, parent) {
            return Err(DomError::Hierarchy(format!(
                "{} would become its own descendant",
                child
            )));
        }
        if let Some(reference) = reference {
            if reference == child {
                return Ok(());
            }
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, reference });
            }
        }

        self.detach(child);

        let index = match reference {
            Some(reference) => self
                .children(parent)
                .iter()
                .position(|c| *c == reference)
                .ok_or(DomError::NotAChild { parent, reference })?,
            None => self.children(parent).len(),
        };
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.records.push(MutationRecord::child_list(parent));
        Ok(())
    }

    /// Detach `id` (and its subtree) from its parent. Detached nodes are left alone.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.check(id)?;
        self.detach(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.slot_node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.slot_node_mut(id) {
            n.parent = None;
        }
        self.records.push(MutationRecord::child_list(parent));
    }

    /// Free the detached subtree rooted at `id` and return how many nodes
    /// were freed. Its handles stop resolving and the slots are reused by
    /// later nodes. Attached nodes and the document root are refused.
    pub fn release(&mut self, id: NodeId) -> Result<usize, DomError> {
        self.check(id)?;
        if id == self.root || self.parent(id).is_some() {
            return Err(DomError::Hierarchy(format!("{} is still attached", id)));
        }

        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(next.index)
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(next.index);
            stack.extend(node.children);
            freed += 1;
        }
        Ok(freed)
    }

    // ------------------------------------------------------------------
    // Attributes, classes and inline style
    // ------------------------------------------------------------------

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::tag_name)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let node = self.node_mut(id)?;
        let NodeKind::Element { attributes, .. } = &mut node.kind else {
            return Err(DomError::Hierarchy(format!("{} is a text node", id)));
        };
        match attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(existing) if existing.1 == value => return Ok(()),
            Some(existing) => existing.1 = value.to_string(),
            None => attributes.push((name.clone(), value.to_string())),
        }
        self.records.push(MutationRecord::attribute(id, name));
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let node = self.node_mut(id)?;
        if let NodeKind::Element { attributes, .. } = &mut node.kind {
            let before = attributes.len();
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
            if attributes.len() != before {
                self.records
                    .push(MutationRecord::attribute(id, name.to_ascii_lowercase()));
            }
        }
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let value = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &value)
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = InlineStyle::parse(self.attribute(id, "style")?);
        style.get(property).map(str::to_string)
    }

    pub fn set_style_property(
        &mut self,
        id: NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let mut style = InlineStyle::parse(self.attribute(id, "style").unwrap_or_default());
        style.set(property, value);
        self.set_attribute(id, "style", &style.to_css())
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of the node and all descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text(text)) = self.node(id).map(Node::kind) {
            out.push_str(text);
            return out;
        }
        for n in self.descendants(id) {
            if let Some(NodeKind::Text(text)) = self.node(n).map(Node::kind) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children with a single text node (or update a text node in place).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        let node = self.node_mut(id)?;
        if let NodeKind::Text(existing) = &mut node.kind {
            *existing = text.to_string();
            self.records.push(MutationRecord::character_data(id));
            return Ok(());
        }

        for child in self.children(id).to_vec() {
            self.detach(child);
            self.release(child)?;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First descendant of `scope` matching `selectors`.
    pub fn query_selector(
        &self,
        scope: NodeId,
        selectors: &str,
    ) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selectors)?;
        Ok(self.select_first(scope, &selector))
    }

    /// All descendants of `scope` matching `selectors`, in document order.
    pub fn query_selector_all(
        &self,
        scope: NodeId,
        selectors: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selectors)?;
        Ok(self.select(scope, &selector))
    }

    pub fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n))
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| selector.matches(self, *n))
    }

    // ------------------------------------------------------------------
    // Mutation records
    // ------------------------------------------------------------------

    /// Drain pending mutation records.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn has_pending_records(&self) -> bool {
        !self.records.is_empty()
    }
}
