use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};
use orbitlens_protocols::{PageAdapter, Platform};
use regex::Regex;
use tracing::debug;

static PROFILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/in/([^/]+)/?$").expect("static regex"));
static TOP_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".pv-top-card").expect("static selector"));
static ACTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".pvs-profile-actions").expect("static selector"));

/// A member profile at `/in/<slug>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedInProfilePage;

impl LinkedInProfilePage {
    pub fn new() -> Self {
        Self
    }

    /// Decoded profile slug from the current path.
    pub fn profile_slug(doc: &Document) -> Option<String> {
        let caps = PROFILE_PATH.captures(doc.path())?;
        let slug = urlencoding::decode(&caps[1]).ok()?;
        let slug = slug.trim();
        (!slug.is_empty()).then(|| slug.to_string())
    }
}

impl PageAdapter for LinkedInProfilePage {
    fn name(&self) -> &str {
        "LinkedInProfilePage"
    }

    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn detect(&self, doc: &Document) -> bool {
        PROFILE_PATH.is_match(doc.path())
    }

    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.document_element(), &TOP_CARD)
    }

    fn validate_widget_zone(&self, doc: &Document, zone: NodeId) -> bool {
        doc.select_first(zone, &ACTIONS).is_some()
    }

    fn apply_css_patch(&self, doc: &mut Document, zone: NodeId) {
        if let Err(e) = doc.set_style_property(zone, "z-index", "2") {
            debug!(node = %zone, error = %e, "CSS patch skipped");
        }
    }

    fn find_username(&self, doc: &Document, _zone: NodeId) -> Option<String> {
        Self::profile_slug(doc)
    }

    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId> {
        doc.select_first(zone, &ACTIONS)
    }
}

#[cfg(test)]
#[path = "profile_page_tests.rs"]
mod tests;
