use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};
use orbitlens_protocols::{PageAdapter, Platform};
use regex::Regex;
use tracing::debug;

use crate::comment;

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[^/]+/[^/]+/(issues|pull)/\d+(/.*)?$").expect("static regex")
});
static HEADERS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".timeline-comment-header").expect("static selector"));
static COMMENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".timeline-comment").expect("static selector"));

/// Issue and pull request conversation pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitHubIssueOrPullRequestPage;

impl GitHubIssueOrPullRequestPage {
    pub fn new() -> Self {
        Self
    }
}

impl PageAdapter for GitHubIssueOrPullRequestPage {
    fn name(&self) -> &str {
        "GitHubIssueOrPullRequestPage"
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
        let Some(container) = doc.closest(zone, &COMMENT) else {
            return;
        };
        // The comment box clips and stacks below its neighbours.
        for (property, value) in [("z-index", "auto"), ("overflow", "visible")] {
            if let Err(e) = doc.set_style_property(container, property, value) {
                debug!(node = %container, error = %e, "CSS patch skipped");
            }
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
#[path = "issue_page_tests.rs"]
mod tests;
