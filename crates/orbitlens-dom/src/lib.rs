//! # OrbitLens DOM
//!
//! A small live DOM the widget layer runs against. It offers only what the
//! page adapters and the orchestrator rely on from a host page:
//!
//! - query by selector (tag, id, class, attribute tests, `>` and descendant
//!   combinators, selector lists)
//! - attribute get/set and inline style edits
//! - child insertion before a reference node, removal by detaching
//! - a mutation-record stream, shared through [`LiveDocument`]
//!
//! Pages are loaded from JSON [`PageSnapshot`]s so fixtures and the CLI can
//! describe a host page without a browser.

mod dom_node;
mod dom_tree;
mod error;
mod live;
mod mutation;
mod selector;
mod snapshot;
mod style;

pub use dom_node::{Node, NodeId, NodeKind};
pub use dom_tree::Document;
pub use error::DomError;
pub use live::{LiveDocument, MutationObserver};
pub use mutation::{MutationKind, MutationRecord};
pub use selector::Selector;
pub use snapshot::{PageSnapshot, SnapshotNode};
pub use style::InlineStyle;

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
