use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};
use orbitlens_protocols::{PageAdapter, Platform};
use regex::Regex;

/// `#<folder>[/<more>...]/<thread id>`.
static THREAD_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[^/]+(/[^/]+)*/[A-Za-z0-9]+$").expect("static regex"));
static HEADERS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".gE.iv.gt").expect("static selector"));
static SENDER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.gD").expect("static selector"));
static ACTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".gH").expect("static selector"));

/// An open conversation. Gmail routes with the location hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct GmailEmailThreadPage;

impl GmailEmailThreadPage {
    pub fn new() -> Self {
        Self
    }
}

impl PageAdapter for GmailEmailThreadPage {
    fn name(&self) -> &str {
        "GmailEmailThreadPage"
    }

    fn platform(&self) -> Platform {
        Platform::Gmail
    }

    fn detect(&self, doc: &Document) -> bool {
        THREAD_HASH.is_match(&doc.hash())
    }

    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.document_element(), &HEADERS)
    }

    fn validate_widget_zone(&self, _doc: &Document, _zone: NodeId) -> bool {
        true
    }

    fn apply_css_patch(&self, _doc: &mut Document, _zone: NodeId) {}

    /// Sender address from the `email` attribute of the name chip.
    fn find_username(&self, doc: &Document, zone: NodeId) -> Option<String> {
        let sender = doc.select_first(zone, &SENDER)?;
        doc.attribute(sender, "email")
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
    }

    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId> {
        doc.select_first(zone, &ACTIONS)
    }
}

#[cfg(test)]
#[path = "thread_page_tests.rs"]
mod tests;
