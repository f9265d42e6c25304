//! Fakes shared by this crate's tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use orbitlens_dom::{Document, LiveDocument, NodeId, PageSnapshot, Selector, SnapshotNode};
use orbitlens_protocols::{
    CredentialStore, Credentials, FetchContext, FetchError, MemberDataRequest,
    MemberDataResponse, MemberDataSource, PageAdapter, Platform,
};
use tokio::sync::Notify;

use crate::credentials::CredentialContext;
use crate::widget::{DisplayLimits, WidgetHost, WidgetServices};

/// `<div class="zone" data-user=.. data-valid=..><div class="actions"/></div>`
pub fn zone(user: Option<&str>, valid: bool, with_actions: bool) -> SnapshotNode {
    let mut node = SnapshotNode::element("div")
        .class("zone")
        .attr("data-valid", if valid { "true" } else { "false" });
    if let Some(user) = user {
        node = node.attr("data-user", user);
    }
    if with_actions {
        node = node.child(SnapshotNode::element("div").class("actions"));
    }
    node
}

pub fn page(zones: Vec<SnapshotNode>) -> Document {
    PageSnapshot::with_body("https://example.test/thread", None, zones)
        .into_document()
        .unwrap()
}

/// Adapter over the [`zone`] markup.
pub struct ZoneAdapter {
    zones: Selector,
    actions: Selector,
    detects: bool,
}

impl ZoneAdapter {
    pub fn new() -> Self {
        Self::detecting(true)
    }

    pub fn detecting(detects: bool) -> Self {
        Self {
            zones: Selector::parse(".zone").unwrap(),
            actions: Selector::parse(".actions").unwrap(),
            detects,
        }
    }
}

impl PageAdapter for ZoneAdapter {
    fn name(&self) -> &str {
        "zone"
    }

    fn platform(&self) -> Platform {
        Platform::Github
    }

    fn detect(&self, _doc: &Document) -> bool {
        self.detects
    }

    fn find_widget_zones(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.document_element(), &self.zones)
    }

    fn validate_widget_zone(&self, doc: &Document, zone: NodeId) -> bool {
        doc.attribute(zone, "data-valid") != Some("false")
    }

    fn apply_css_patch(&self, doc: &mut Document, zone: NodeId) {
        let _ = doc.set_style_property(zone, "overflow", "visible");
    }

    fn find_username(&self, doc: &Document, zone: NodeId) -> Option<String> {
        doc.attribute(zone, "data-user").map(str::to_string)
    }

    fn find_insertion_point(&self, doc: &Document, zone: NodeId) -> Option<NodeId> {
        doc.select_first(zone, &self.actions)
    }
}

/// Member-data source answering from a map, optionally held at a gate.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, MemberDataResponse>,
    fail: bool,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, username: &str, response: MemberDataResponse) -> Self {
        self.responses.insert(username.to_string(), response);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemberDataSource for FakeSource {
    async fn request_member_data(
        &self,
        _ctx: &FetchContext,
        request: &MemberDataRequest,
    ) -> Result<MemberDataResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(FetchError::Transport("connection reset".to_string()));
        }
        Ok(self
            .responses
            .get(&request.username)
            .cloned()
            .unwrap_or_else(|| MemberDataResponse::failed(404)))
    }
}

/// Credential store with fixed contents that counts settings requests.
pub struct FixedStore {
    credentials: Option<Credentials>,
    pub settings_opened: AtomicUsize,
}

impl FixedStore {
    pub fn configured() -> Self {
        Self {
            credentials: Some(Credentials::new("tok", "acme")),
            settings_opened: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            credentials: None,
            settings_opened: AtomicUsize::new(0),
        }
    }
}

impl CredentialStore for FixedStore {
    fn load(&self) -> Option<Credentials> {
        self.credentials.clone()
    }

    fn open_settings(&self) {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn host(
    doc: Document,
    source: Arc<FakeSource>,
    store: Arc<FixedStore>,
    limits: DisplayLimits,
) -> Arc<WidgetHost> {
    let credentials = Arc::new(CredentialContext::load(store));
    let services = WidgetServices::new(source, credentials).with_limits(limits);
    Arc::new(WidgetHost::new(LiveDocument::new(doc), services))
}
