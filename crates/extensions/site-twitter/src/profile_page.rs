use std::sync::LazyLock;

use orbitlens_dom::{Document, NodeId, Selector};
use orbitlens_protocols::{PageAdapter, Platform};
use regex::Regex;
use tracing::debug;
use url::Url;

static PHOTO_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([A-Za-z0-9_]{1,15})/photo$").expect("static regex"));
static PHOTO_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href$="/photo"]"#).expect("static selector"));
static USER_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[data-testid="UserName"]"#).expect("static selector"));
static PRIMARY_COLUMN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="primaryColumn"]"#).expect("static selector")
});
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("static selector"));

/// A user profile. The URL alone cannot tell a profile from other
/// top-level routes, so detection keys off the avatar link.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwitterProfilePage;

impl TwitterProfilePage {
    pub fn new() -> Self {
        Self
    }

    /// Handle from the first profile-photo link on the page.
    pub fn profile_handle(doc: &Document) -> Option<String> {
        doc.select(doc.document_element(), &PHOTO_LINK)
            .into_iter()
            .filter_map(|link| doc.attribute(link, "href"))
            .find_map(|href| handle_from_photo_href(doc, href))
    }
}

fn handle_from_photo_href(doc: &Document, href: &str) -> Option<String> {
    let resolved = doc.location().join(href).ok()?;
    if !same_site(doc.location(), &resolved) {
        return None;
    }
    PHOTO_PATH
        .captures(resolved.path())
        .map(|caps| caps[1].to_string())
}

fn same_site(page: &Url, link: &Url) -> bool {
    page.host_str() == link.host_str()
}

impl PageAdapter for TwitterProfilePage {
    fn name(&self) -> &str {
        "TwitterProfilePage"
    }

    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn detect(&self, doc: &Document) -> bool {
        Self::profile_handle(doc).is_some()
    }

    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.document_element(), &USER_NAME)
    }

    fn validate_widget_zone(&self, _doc: &Document, _zone: NodeId) -> bool {
        true
    }

    fn apply_css_patch(&self, doc: &mut Document, zone: NodeId) {
        let Some(column) = doc.closest(zone, &PRIMARY_COLUMN) else {
            return;
        };
        if let Err(e) = doc.set_style_property(column, "z-index", "1") {
            debug!(node = %column, error = %e, "CSS patch skipped");
        }
    }

    /// The `@handle` line of the name block, else the avatar link's handle.
    fn find_username(&self, doc: &Document, zone: NodeId) -> Option<String> {
        doc.select(zone, &SPAN)
            .into_iter()
            .find_map(|span| {
                let text = doc.text_content(span);
                let handle = text.trim().strip_prefix('@')?.trim();
                (!handle.is_empty()).then(|| handle.to_string())
            })
            .or_else(|| Self::profile_handle(doc))
    }

    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId> {
        doc.first_element_child(zone)
    }
}

#[cfg(test)]
#[path = "profile_page_tests.rs"]
mod tests;
