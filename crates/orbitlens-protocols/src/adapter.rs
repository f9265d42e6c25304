//! Page adapter trait.

use orbitlens_dom::{Document, NodeId};

use crate::types::Platform;

/// Site/page-kind specific DOM knowledge.
///
/// Every method is synchronous and works only against the document it is
/// handed: no network I/O, no extension state. Missing nodes resolve to
/// `None` or a no-op, never a panic, since host pages change shape without
/// notice.
pub trait PageAdapter: Send + Sync {
    /// Human-readable adapter name, used in logs.
    fn name(&self) -> &str;

    /// Platform this adapter injects widgets for.
    fn platform(&self) -> Platform;

    /// Cheap test against the current location or a DOM landmark.
    fn detect(&self, doc: &Document) -> bool;

    /// Current widget zones in document order. Re-queried on every pass.
    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId>;

    /// Fast precondition on a zone. Adapters without one return `true`.
    fn validate_widget_zone(&self, doc: &Document, zone: NodeId) -> bool;

    /// Best-effort visual fix-up around a zone; must tolerate absent nodes.
    fn apply_css_patch(&self, doc: &mut Document, zone: NodeId);

    /// Handle of the person who authored the zone's content.
    fn find_username(&self, doc: &Document, zone: NodeId) -> Option<String>;

    /// Element that becomes the parent of the injected widget.
    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId>;
}
