//! Writes a [`WidgetView`] into the widget's dropdown.

use orbitlens_dom::{Document, DomError, NodeId};

use super::element::WidgetAction;
use super::view::{MemberView, WidgetView};
use crate::instance::{ADDITIONAL_DATA_SLOT, find_slot};

/// `part` attribute of the dropdown container.
pub const DROPDOWN_PART: &str = "dropdown";

/// Replace the widget's dropdown with a fresh render of `view`.
///
/// The new dropdown is built detached and swapped in last, so observers see
/// one complete subtree. Replaced dropdowns are released.
pub fn render_widget(
    doc: &mut Document,
    widget: NodeId,
    view: &WidgetView,
    open: bool,
) -> Result<NodeId, DomError> {
    if doc.node(widget).is_none() {
        return Err(DomError::UnknownNode(widget));
    }
    let dropdown = doc.create_element("div");
    if let Err(e) = fill_dropdown(doc, dropdown, view, open) {
        doc.release(dropdown)?;
        return Err(e);
    }

    for old in dropdowns(doc, widget) {
        doc.remove(old)?;
        doc.release(old)?;
    }
    doc.append_child(widget, dropdown)?;
    Ok(dropdown)
}

fn fill_dropdown(
    doc: &mut Document,
    dropdown: NodeId,
    view: &WidgetView,
    open: bool,
) -> Result<(), DomError> {
    doc.set_attribute(dropdown, "part", DROPDOWN_PART)?;
    doc.set_attribute(dropdown, "data-state", view.phase().as_str())?;
    doc.set_attribute(dropdown, "data-open", if open { "true" } else { "false" })?;

    if let Some(message) = view.message() {
        let p = child(doc, dropdown, "p", "obe-message", Some(message))?;
        doc.set_attribute(p, "role", "status")?;
    }
    match view {
        WidgetView::AuthError => {
            action_button(doc, dropdown, WidgetAction::OpenSettings, "Open settings")?;
        }
        WidgetView::Member(member) => render_member(doc, dropdown, member)?,
        _ => {}
    }
    Ok(())
}

/// Hand the response's extra payload to the platform additional-data slot.
pub(crate) fn render_additional_data(
    doc: &mut Document,
    widget: NodeId,
    data: Option<&serde_json::Value>,
) -> Result<(), DomError> {
    let (Some(slot), Some(data)) = (find_slot(doc, widget, ADDITIONAL_DATA_SLOT), data) else {
        return Ok(());
    };
    doc.set_attribute(slot, "data-payload", &data.to_string())
}

pub(crate) fn dropdowns(doc: &Document, widget: NodeId) -> Vec<NodeId> {
    doc.element_children(widget)
        .into_iter()
        .filter(|&c| doc.attribute(c, "part") == Some(DROPDOWN_PART))
        .collect()
}

fn render_member(doc: &mut Document, dropdown: NodeId, member: &MemberView) -> Result<(), DomError> {
    child(doc, dropdown, "div", "obe-member-name", Some(&member.name))?;
    if let Some(title) = &member.job_title {
        child(doc, dropdown, "div", "obe-member-title", Some(title))?;
    }
    if let Some(org) = &member.organization {
        let link = child(doc, dropdown, "a", "obe-organization", Some(&org.name))?;
        if let Some(url) = &org.website_url {
            doc.set_attribute(link, "href", url)?;
        }
        if let Some(stage) = &org.lifecycle_stage {
            doc.set_attribute(link, "data-lifecycle-stage", stage)?;
        }
    }

    if !member.pills.is_empty() {
        let pills = child(doc, dropdown, "div", "obe-pills", None)?;
        for pill in &member.pills {
            child(doc, pills, "span", "obe-pill", Some(&pill.label()))?;
        }
    }

    if !member.identities.items.is_empty() {
        let list = child(doc, dropdown, "div", "obe-identities", None)?;
        for badge in &member.identities.items {
            let tag = if badge.profile_url.is_some() { "a" } else { "span" };
            let node = child(doc, list, tag, "obe-identity", Some(&badge.handle))?;
            doc.set_attribute(node, "data-source", badge.source.label())?;
            if let Some(url) = &badge.profile_url {
                doc.set_attribute(node, "href", url)?;
            }
        }
        if let Some(label) = member.identities.toggle_label() {
            action_button(doc, list, WidgetAction::ShowMoreIdentities, &label)?;
        }
    }

    if !member.tags.items.is_empty() {
        let list = child(doc, dropdown, "div", "obe-tags", None)?;
        for tag in &member.tags.items {
            child(doc, list, "span", "obe-tag", Some(tag))?;
        }
        if let Some(label) = member.tags.toggle_label() {
            action_button(doc, list, WidgetAction::ShowMoreTags, &label)?;
        }
    }
    Ok(())
}

fn child(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<NodeId, DomError> {
    let node = doc.create_element(tag);
    doc.set_attribute(node, "class", class)?;
    if let Some(text) = text {
        doc.set_text_content(node, text)?;
    }
    doc.append_child(parent, node)?;
    Ok(node)
}

fn action_button(
    doc: &mut Document,
    parent: NodeId,
    action: WidgetAction,
    label: &str,
) -> Result<NodeId, DomError> {
    let button = child(doc, parent, "button", "obe-action", Some(label))?;
    doc.set_attribute(button, "data-action", action.as_str())?;
    Ok(button)
}
