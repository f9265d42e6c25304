//! # OrbitLens Core
//!
//! Turns page adapters and a live document into widget instances, and runs
//! each widget's member-data state machine.
//!
//! - [`Orchestrator`] - detects the active adapter and injects one widget
//!   instance per zone, replacing stale ones
//! - [`WidgetHost`] - owns widget state machines and routes hover/click
//! - [`WidgetElement`] - one widget's load state, view and rendering
//! - [`CredentialContext`] - credentials read once, refreshed explicitly
//! - [`SiteRegistry`] - site integrations by id and host

mod credentials;
mod instance;
mod orchestrator;
mod registry;
mod style;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use credentials::{CredentialContext, StaticCredentialStore};
pub use instance::{ADDITIONAL_DATA_SLOT, BUTTON_SLOT, WIDGET_TAG};
pub use orchestrator::{Injection, Orchestrator, PassReport, SkipReason, detect_page};
pub use registry::SiteRegistry;
pub use style::{StyledComponent, Stylesheet};
pub use widget::{
    DisplayLimits, LoadState, MemberDataState, MemberView, Pill, WidgetElement, WidgetHost,
    WidgetPhase, WidgetServices, WidgetView,
};
