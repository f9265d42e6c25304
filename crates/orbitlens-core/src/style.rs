//! Shared stylesheets adopted by widget nodes.

use std::sync::Arc;

use orbitlens_dom::{Document, DomError, NodeId};

const STYLE_ATTR: &str = "data-obe-style";

const WIDGET_CSS: &str = "\
:host { position: relative; display: inline-flex; align-items: center; }
[part=\"dropdown\"] { position: absolute; top: 100%; right: 0; min-width: 320px; z-index: 100; }
[part=\"dropdown\"][data-open=\"false\"] { display: none; }
.obe-pill { border-radius: 999px; padding: 0 8px; font-size: 12px; }
.obe-tag { margin-right: 4px; }
.obe-identity { margin-right: 6px; }
";

/// Immutable CSS resource shared by every component that adopts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    name: String,
    css: String,
}

impl Stylesheet {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }

    /// Base stylesheet for `obe-widget` elements.
    pub fn widget() -> Self {
        Self::new("widget", WIDGET_CSS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// A component with a stylesheet handed to it at construction.
#[derive(Debug, Clone)]
pub struct StyledComponent {
    stylesheet: Arc<Stylesheet>,
}

impl StyledComponent {
    pub fn new(stylesheet: Arc<Stylesheet>) -> Self {
        Self { stylesheet }
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Attach the stylesheet to `node` as its first `<style>` child.
    /// Adopting twice leaves a single copy.
    pub fn adopt(&self, doc: &mut Document, node: NodeId) -> Result<NodeId, DomError> {
        if let Some(existing) = self.adopted_in(doc, node) {
            return Ok(existing);
        }

        let style = doc.create_element("style");
        doc.set_attribute(style, STYLE_ATTR, self.stylesheet.name())?;
        doc.set_text_content(style, self.stylesheet.css())?;
        doc.prepend(node, style)?;
        Ok(style)
    }

    /// The `<style>` child already carrying this stylesheet, if any.
    pub fn adopted_in(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        doc.element_children(node).into_iter().find(|&child| {
            doc.tag_name(child) == Some("style")
                && doc.attribute(child, STYLE_ATTR) == Some(self.stylesheet.name())
        })
    }
}
