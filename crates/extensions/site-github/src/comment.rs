//! Comment-header lookups shared by the GitHub adapters.

use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};

static AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.author").expect("static selector"));
static ACTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".timeline-comment-actions").expect("static selector"));

/// Login shown in the header's author link.
pub(crate) fn author(doc: &Document, header: NodeId) -> Option<String> {
    let link = doc.select_first(header, &AUTHOR)?;
    let login = doc.text_content(link).trim().to_string();
    (!login.is_empty()).then_some(login)
}

/// The header's action cell (reactions, kebab menu).
pub(crate) fn actions(doc: &Document, header: NodeId) -> Option<NodeId> {
    doc.select_first(header, &ACTIONS)
}
