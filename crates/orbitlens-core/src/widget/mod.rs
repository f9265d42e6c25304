//! Widget element: per-instance member-data state machine, view model,
//! rendering and event dispatch.

mod element;
mod host;
mod render;
mod state;
mod view;

use std::sync::Arc;

use orbitlens_config::WidgetConfig;
use orbitlens_protocols::MemberDataSource;

use crate::credentials::CredentialContext;
use crate::style::Stylesheet;

pub use element::{WidgetAction, WidgetElement};
pub use host::WidgetHost;
pub use render::{DROPDOWN_PART, render_widget};
pub use state::{LoadState, MemberDataState, WidgetPhase, WidgetState};
pub use view::{IdentityBadge, MemberView, Pill, Truncated, WidgetView};

/// How many tags and identities a collapsed member view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub tag_limit: usize,
    pub identity_limit: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            tag_limit: 3,
            identity_limit: 5,
        }
    }
}

impl From<&WidgetConfig> for DisplayLimits {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            tag_limit: config.tag_limit,
            identity_limit: config.identity_limit,
        }
    }
}

/// Collaborators every widget on a page shares.
pub struct WidgetServices {
    pub source: Arc<dyn MemberDataSource>,
    pub credentials: Arc<CredentialContext>,
    pub stylesheet: Arc<Stylesheet>,
    pub limits: DisplayLimits,
}

impl WidgetServices {
    pub fn new(source: Arc<dyn MemberDataSource>, credentials: Arc<CredentialContext>) -> Self {
        Self {
            source,
            credentials,
            stylesheet: Arc::new(Stylesheet::widget()),
            limits: DisplayLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DisplayLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: Arc<Stylesheet>) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
