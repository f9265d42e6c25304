use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use orbitlens_dom::{Document, DomError, LiveDocument, NodeId};
use orbitlens_protocols::MemberDataRequest;
use parking_lot::Mutex;
use tracing::debug;

use super::WidgetServices;
use super::element::WidgetElement;
use crate::instance::build_widget;

struct Registered {
    seq: u64,
    element: Arc<WidgetElement>,
}

/// Live widget state machines on one page, keyed by widget node.
///
/// Released widgets are retired rather than dropped: their nodes are freed
/// by [`WidgetHost::reclaim`] once no lookup or click still holds them.
pub struct WidgetHost {
    doc: LiveDocument,
    services: Arc<WidgetServices>,
    widgets: DashMap<NodeId, Registered>,
    next_seq: AtomicU64,
    retired: Mutex<Vec<Arc<WidgetElement>>>,
}

impl WidgetHost {
    pub fn new(doc: LiveDocument, services: WidgetServices) -> Self {
        Self {
            doc,
            services: Arc::new(services),
            widgets: DashMap::new(),
            next_seq: AtomicU64::new(0),
            retired: Mutex::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &LiveDocument {
        &self.doc
    }

    pub fn services(&self) -> &Arc<WidgetServices> {
        &self.services
    }

    /// Construct and mount a state machine for `node` without registering it.
    pub(crate) fn create(
        &self,
        doc: &mut Document,
        node: NodeId,
        request: MemberDataRequest,
    ) -> Result<Arc<WidgetElement>, DomError> {
        let element = Arc::new(WidgetElement::new(
            node,
            request,
            self.doc.clone(),
            self.services.clone(),
        ));
        element.mount(doc)?;
        Ok(element)
    }

    /// Mount a widget for `request` as the last child of `parent`, outside
    /// any adapter pass.
    pub fn attach(
        &self,
        parent: NodeId,
        request: MemberDataRequest,
    ) -> Result<Arc<WidgetElement>, DomError> {
        let element = self.doc.mutate(|doc| {
            let node = build_widget(doc, &request.username, request.platform)?;
            let element = self.create(doc, node, request)?;
            doc.append_child(parent, node)?;
            Ok::<_, DomError>(element)
        })?;
        self.register(element.clone());
        Ok(element)
    }

    pub(crate) fn register(&self, element: Arc<WidgetElement>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.widgets.insert(element.node(), Registered { seq, element });
    }

    /// Deregister the state machine for a removed widget node.
    ///
    /// The element is retired until [`Self::reclaim`] frees its node. A
    /// detached node with no state machine is released right away.
    pub(crate) fn release(&self, doc: &mut Document, node: NodeId) -> bool {
        match self.widgets.remove(&node) {
            Some((_, registered)) => {
                self.retired.lock().push(registered.element);
                true
            }
            None => {
                if doc.node(node).is_some() && doc.parent(node).is_none() {
                    if let Err(e) = doc.release(node) {
                        debug!(widget = %node, error = %e, "Widget node not released");
                    }
                }
                false
            }
        }
    }

    /// Free the nodes of retired widgets nothing else holds. Widgets still
    /// loading or handling a click stay retired for a later call. Returns
    /// the number of nodes freed.
    pub fn reclaim(&self, doc: &mut Document) -> usize {
        let mut retired = self.retired.lock();
        let mut freed = 0;
        retired.retain(|element| {
            if Arc::strong_count(element) > 1 {
                return true;
            }
            let node = element.node();
            if doc.node(node).is_some() && doc.parent(node).is_none() {
                match doc.release(node) {
                    Ok(count) => freed += count,
                    Err(e) => debug!(widget = %node, error = %e, "Widget node not released"),
                }
            }
            false
        });
        if freed > 0 {
            debug!(freed, pending = retired.len(), "Reclaimed retired widgets");
        }
        freed
    }

    /// Released widgets whose nodes are not freed yet.
    pub fn retired_len(&self) -> usize {
        self.retired.lock().len()
    }

    pub fn get(&self, node: NodeId) -> Option<Arc<WidgetElement>> {
        self.widgets.get(&node).map(|w| w.element.clone())
    }

    /// Registered widgets in creation order.
    pub fn widgets(&self) -> Vec<Arc<WidgetElement>> {
        let mut widgets: Vec<_> = self
            .widgets
            .iter()
            .map(|w| (w.seq, w.element.clone()))
            .collect();
        widgets.sort_by_key(|(seq, _)| *seq);
        widgets.into_iter().map(|(_, element)| element).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Pointer entered `target`: prefetch for the widget containing it.
    pub async fn hover(&self, target: NodeId) {
        let path = self.composed_path(target);
        if let Some(widget) = self.innermost(&path) {
            widget.trigger().await;
        }
    }

    /// Document-level click on `target`. Widgets outside the click's path
    /// close their dropdowns; the widget inside it handles the click.
    pub async fn click(&self, target: NodeId) {
        let path = self.composed_path(target);
        let clicked = self.innermost(&path);

        for widget in self.widgets() {
            if clicked.as_ref().is_some_and(|c| c.node() == widget.node()) {
                continue;
            }
            widget.close_dropdown();
        }

        if let Some(widget) = clicked {
            debug!(widget = %widget.node(), target = %target, "Widget clicked");
            widget.handle_click(&path).await;
        }
    }

    fn composed_path(&self, target: NodeId) -> Vec<NodeId> {
        self.doc.read(|doc| {
            std::iter::once(target)
                .chain(doc.ancestors(target))
                .collect()
        })
    }

    fn innermost(&self, path: &[NodeId]) -> Option<Arc<WidgetElement>> {
        path.iter().find_map(|&node| self.get(node))
    }
}
