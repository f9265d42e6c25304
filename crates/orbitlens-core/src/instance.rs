//! Widget instance subtree: the `obe-widget` node and its slot children.

use orbitlens_dom::{Document, DomError, NodeId};
use orbitlens_protocols::Platform;

/// Tag of the widget element.
pub const WIDGET_TAG: &str = "obe-widget";
/// `slot` value of the platform button child.
pub const BUTTON_SLOT: &str = "button";
/// `slot` value of the platform additional-data child.
pub const ADDITIONAL_DATA_SLOT: &str = "additional-data";

/// Build a detached widget node with both slot children.
pub(crate) fn build_widget(
    doc: &mut Document,
    username: &str,
    platform: Platform,
) -> Result<NodeId, DomError> {
    let widget = doc.create_element(WIDGET_TAG);
    doc.set_attribute(widget, "username", username)?;
    doc.set_attribute(widget, "platform", platform.as_str())?;
    ensure_slot(doc, widget, &platform.button_tag(), BUTTON_SLOT)?;
    ensure_slot(doc, widget, &platform.additional_data_tag(), ADDITIONAL_DATA_SLOT)?;
    Ok(widget)
}

/// Reuse the widget's `tag` child if present, otherwise append one.
pub(crate) fn ensure_slot(
    doc: &mut Document,
    widget: NodeId,
    tag: &str,
    slot: &str,
) -> Result<NodeId, DomError> {
    let existing = doc
        .element_children(widget)
        .into_iter()
        .find(|&child| doc.tag_name(child) == Some(tag));

    let node = match existing {
        Some(node) => node,
        None => {
            let node = doc.create_element(tag);
            doc.append_child(widget, node)?;
            node
        }
    };
    doc.set_attribute(node, "slot", slot)?;
    Ok(node)
}

/// The widget's child assigned to `slot`.
pub(crate) fn find_slot(doc: &Document, widget: NodeId, slot: &str) -> Option<NodeId> {
    doc.element_children(widget)
        .into_iter()
        .find(|&child| doc.attribute(child, "slot") == Some(slot))
}

/// Every widget node beneath `zone`, outermost first.
pub(crate) fn widgets_in(doc: &Document, zone: NodeId) -> Vec<NodeId> {
    doc.descendants(zone)
        .into_iter()
        .filter(|&n| doc.tag_name(n) == Some(WIDGET_TAG))
        .collect()
}
