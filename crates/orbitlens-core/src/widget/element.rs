use std::str::FromStr;
use std::sync::Arc;

use orbitlens_dom::{Document, DomError, LiveDocument, NodeId};
use orbitlens_protocols::{MemberDataRequest, Platform};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::WidgetServices;
use super::render::{render_additional_data, render_widget};
use super::state::{LoadState, MemberDataState, WidgetPhase, WidgetState};
use super::view::WidgetView;
use crate::style::StyledComponent;

/// `data-action` values understood inside a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    ShowMoreTags,
    ShowMoreIdentities,
    OpenSettings,
}

impl WidgetAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetAction::ShowMoreTags => "show-more-tags",
            WidgetAction::ShowMoreIdentities => "show-more-identities",
            WidgetAction::OpenSettings => "open-settings",
        }
    }
}

impl FromStr for WidgetAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show-more-tags" => Ok(WidgetAction::ShowMoreTags),
            "show-more-identities" => Ok(WidgetAction::ShowMoreIdentities),
            "open-settings" => Ok(WidgetAction::OpenSettings),
            other => Err(format!("unknown widget action: {}", other)),
        }
    }
}

/// What a click inside the widget resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    Button,
    Action(WidgetAction),
}

/// One injected widget: its lookup request and member-data state machine.
pub struct WidgetElement {
    node: NodeId,
    request: MemberDataRequest,
    doc: LiveDocument,
    services: Arc<WidgetServices>,
    styled: StyledComponent,
    state: Mutex<WidgetState>,
}

impl WidgetElement {
    pub(crate) fn new(
        node: NodeId,
        request: MemberDataRequest,
        doc: LiveDocument,
        services: Arc<WidgetServices>,
    ) -> Self {
        let styled = StyledComponent::new(services.stylesheet.clone());
        Self {
            node,
            request,
            doc,
            services,
            styled,
            state: Mutex::new(WidgetState::default()),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn username(&self) -> &str {
        &self.request.username
    }

    pub fn platform(&self) -> Platform {
        self.request.platform
    }

    pub fn phase(&self) -> WidgetPhase {
        self.state.lock().phase()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().load
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().dropdown_open
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::build(&self.state.lock(), self.services.limits)
    }

    /// Adopt the stylesheet and render the idle dropdown into `doc`.
    /// Used while the caller already holds the document.
    pub(crate) fn mount(&self, doc: &mut Document) -> Result<(), DomError> {
        self.styled.adopt(doc, self.node)?;
        self.render_into(doc)
    }

    /// Start the member lookup. Only the first trigger does anything.
    pub async fn trigger(&self) {
        {
            let mut state = self.state.lock();
            if state.load != LoadState::NotLoaded {
                debug!(widget = %self.node, phase = %state.phase(), "Trigger ignored");
                return;
            }
            state.load = LoadState::Loading;
        }

        let Some(ctx) = self.services.credentials.fetch_context() else {
            info!(username = %self.request.username, "No credentials configured");
            self.finish(MemberDataState::AuthError, None);
            return;
        };
        self.render();

        debug!(
            username = %self.request.username,
            platform = %self.request.platform,
            "Requesting member data"
        );
        match self.services.source.request_member_data(&ctx, &self.request).await {
            Ok(response) => {
                let extra = response.additional_data.clone();
                self.finish(MemberDataState::from_response(response), extra);
            }
            Err(e) => {
                warn!(username = %self.request.username, error = %e, "Member lookup failed");
                self.finish(MemberDataState::OtherError, None);
            }
        }
    }

    fn finish(&self, outcome: MemberDataState, extra: Option<serde_json::Value>) {
        {
            let mut state = self.state.lock();
            if !state.finish(outcome) {
                return;
            }
            state.additional_data = extra;
            debug!(widget = %self.node, phase = %state.phase(), "Member lookup finished");
        }
        self.render();
    }

    pub fn toggle_dropdown(&self) {
        {
            let mut state = self.state.lock();
            state.dropdown_open = !state.dropdown_open;
        }
        self.render();
    }

    /// Close the dropdown if open; load state is unaffected.
    pub fn close_dropdown(&self) {
        {
            let mut state = self.state.lock();
            if !state.dropdown_open {
                return;
            }
            state.dropdown_open = false;
        }
        self.render();
    }

    /// Show every tag. One-way: the list never collapses again.
    pub fn expand_tags(&self) {
        {
            let mut state = self.state.lock();
            if state.show_all_tags {
                return;
            }
            state.show_all_tags = true;
        }
        self.render();
    }

    /// Show every identity badge. One-way like [`Self::expand_tags`].
    pub fn expand_identities(&self) {
        {
            let mut state = self.state.lock();
            if state.show_all_identities {
                return;
            }
            state.show_all_identities = true;
        }
        self.render();
    }

    /// Handle a click whose composed path (target first) passes through
    /// this widget.
    pub(crate) async fn handle_click(&self, path: &[NodeId]) {
        let target = self.doc.read(|doc| self.resolve_click(doc, path));
        match target {
            Some(ClickTarget::Button) => {
                self.toggle_dropdown();
                self.trigger().await;
            }
            Some(ClickTarget::Action(WidgetAction::ShowMoreTags)) => self.expand_tags(),
            Some(ClickTarget::Action(WidgetAction::ShowMoreIdentities)) => {
                self.expand_identities()
            }
            Some(ClickTarget::Action(WidgetAction::OpenSettings)) => {
                self.services.credentials.open_settings()
            }
            None => {}
        }
    }

    fn resolve_click(&self, doc: &Document, path: &[NodeId]) -> Option<ClickTarget> {
        let button_tag = self.request.platform.button_tag();
        for &node in path.iter().take_while(|&&n| n != self.node) {
            if let Some(action) = doc.attribute(node, "data-action") {
                return action.parse().ok().map(ClickTarget::Action);
            }
            if doc.tag_name(node) == Some(button_tag.as_str()) {
                return Some(ClickTarget::Button);
            }
        }
        None
    }

    fn render(&self) {
        self.doc.mutate(|doc| {
            if let Err(e) = self.render_into(doc) {
                debug!(widget = %self.node, error = %e, "Widget render skipped");
            }
        });
    }

    fn render_into(&self, doc: &mut Document) -> Result<(), DomError> {
        let (view, open, extra) = {
            let state = self.state.lock();
            (
                WidgetView::build(&state, self.services.limits),
                state.dropdown_open,
                state.additional_data.clone(),
            )
        };
        render_widget(doc, self.node, &view, open)?;
        render_additional_data(doc, self.node, extra.as_ref())
    }
}
