use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};
use orbitlens_protocols::{PageAdapter, Platform};
use regex::Regex;
use tracing::debug;

use crate::comment;

static PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[^/]+/[^/]+/discussions/\d+(/.*)?$").expect("static regex"));
static HEADERS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        ".discussion-timeline .timeline-comment-header, .js-comment-container .timeline-comment-header",
    )
    .expect("static selector")
});
static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".js-comment-container").expect("static selector"));

/// Discussion threads, including nested replies.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitHubDiscussionPage;

impl GitHubDiscussionPage {
    pub fn new() -> Self {
        Self
    }
}

impl PageAdapter for GitHubDiscussionPage {
    fn name(&self) -> &str {
        "GitHubDiscussionPage"
    }

    fn platform(&self) -> Platform {
        Platform::Github
    }

    fn detect(&self, doc: &Document) -> bool {
        PATH.is_match(doc.path())
    }

    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.document_element(), &HEADERS)
    }

    fn validate_widget_zone(&self, doc: &Document, zone: NodeId) -> bool {
        comment::actions(doc, zone).is_some()
    }

    fn apply_css_patch(&self, doc: &mut Document, zone: NodeId) {
        let Some(container) = doc.closest(zone, &CONTAINER) else {
            return;
        };
        if let Err(e) = doc.set_style_property(container, "overflow", "visible") {
            debug!(node = %container, error = %e, "CSS patch skipped");
        }
    }

    fn find_username(&self, doc: &Document, zone: NodeId) -> Option<String> {
        comment::author(doc, zone)
    }

    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId> {
        comment::actions(doc, zone)
    }
}

#[cfg(test)]
#[path = "discussion_page_tests.rs"]
mod tests;
