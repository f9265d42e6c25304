use std::sync::atomic::Ordering;

use chrono::{TimeZone, Utc};
use orbitlens_dom::NodeId;
use orbitlens_protocols::{
    Identity, IdentitySource, MemberDataRequest, MemberDataResponse, MemberRecord, OrbitLevel,
    Platform,
};
use tokio::sync::Notify;

use super::render::dropdowns;
use super::*;
use crate::instance::{BUTTON_SLOT, find_slot};
use crate::orchestrator::Orchestrator;
use crate::test_support::{FakeSource, FixedStore, ZoneAdapter, host, page, zone};

fn member_with_tags(n: usize) -> MemberRecord {
    let mut member = MemberRecord::new("Grace Hopper");
    member.tags = (1..=n).map(|i| format!("tag-{}", i)).collect();
    member
}

struct Page {
    orchestrator: Orchestrator,
    source: Arc<FakeSource>,
    store: Arc<FixedStore>,
}

impl Page {
    fn new(source: FakeSource, store: FixedStore) -> Self {
        let source = Arc::new(source);
        let store = Arc::new(store);
        let host = host(
            page(vec![
                zone(Some("grace"), true, true),
                zone(Some("linus"), true, true),
            ]),
            source.clone(),
            store.clone(),
            DisplayLimits::default(),
        );
        let orchestrator = Orchestrator::new(host);
        let adapter = ZoneAdapter::new();
        orchestrator
            .host()
            .document()
            .mutate(|doc| orchestrator.add_widget_elements(doc, &adapter, Platform::Github));
        Self {
            orchestrator,
            source,
            store,
        }
    }

    fn host(&self) -> &Arc<WidgetHost> {
        self.orchestrator.host()
    }

    fn rerun(&self) {
        let adapter = ZoneAdapter::new();
        self.host()
            .document()
            .mutate(|doc| self.orchestrator.add_widget_elements(doc, &adapter, Platform::Github));
    }

    fn node_count(&self) -> usize {
        self.host().document().read(|doc| doc.node_count())
    }

    fn widget(&self, username: &str) -> Arc<WidgetElement> {
        self.host()
            .widgets()
            .into_iter()
            .find(|w| w.username() == username)
            .unwrap()
    }

    fn dropdown(&self, widget: &WidgetElement) -> NodeId {
        self.host()
            .document()
            .read(|doc| dropdowns(doc, widget.node()))
            .into_iter()
            .next()
            .unwrap()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.host()
            .document()
            .read(|doc| doc.attribute(node, name).map(str::to_string))
    }

    fn texts(&self, scope: NodeId, selector: &str) -> Vec<String> {
        self.host().document().read(|doc| {
            doc.query_selector_all(scope, selector)
                .unwrap()
                .into_iter()
                .map(|n| doc.text_content(n))
                .collect()
        })
    }

    fn find(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.host()
            .document()
            .read(|doc| doc.query_selector(scope, selector).unwrap())
    }
}

// ------------------------------------------------------------------
// Response mapping
// ------------------------------------------------------------------

#[test]
fn test_response_mapping() {
    assert_eq!(
        MemberDataState::from_response(MemberDataResponse::failed(401)),
        MemberDataState::AuthError
    );
    assert_eq!(
        MemberDataState::from_response(MemberDataResponse::failed(404)),
        MemberDataState::NotAMember
    );
    assert_eq!(
        MemberDataState::from_response(MemberDataResponse::failed(500)),
        MemberDataState::OtherError
    );
    assert!(matches!(
        MemberDataState::from_response(MemberDataResponse::found(MemberRecord::new("Ada"))),
        MemberDataState::Member(m) if m.name == "Ada"
    ));
}

#[test]
fn test_success_without_member_is_error() {
    let mut response = MemberDataResponse::failed(200);
    response.success = true;
    assert_eq!(
        MemberDataState::from_response(response),
        MemberDataState::OtherError
    );
}

#[test]
fn test_status_wins_over_success_flag() {
    let mut response = MemberDataResponse::found(MemberRecord::new("Ada"));
    response.status = 401;
    assert_eq!(
        MemberDataState::from_response(response),
        MemberDataState::AuthError
    );
}

#[test]
fn test_phase_summary() {
    let mut state = WidgetState::default();
    assert_eq!(state.phase(), WidgetPhase::Idle);
    state.load = LoadState::Loading;
    assert_eq!(state.phase(), WidgetPhase::Loading);
    assert!(state.finish(MemberDataState::NotAMember));
    assert_eq!(state.phase(), WidgetPhase::NotAMember);
    assert!(state.phase().is_terminal());

    // Terminal states stick.
    assert!(!state.finish(MemberDataState::AuthError));
    assert_eq!(state.phase(), WidgetPhase::NotAMember);
    assert_eq!(WidgetPhase::AuthError.to_string(), "authError");
}

// ------------------------------------------------------------------
// View model
// ------------------------------------------------------------------

#[test]
fn test_teammate_pill_without_level() {
    let mut member = MemberRecord::new("Ada");
    member.orbit_level = Some(OrbitLevel::Teammate);
    let view = MemberView::build(&member, DisplayLimits::default(), false, false);
    assert_eq!(view.pills, vec![Pill::Teammate]);
    assert_eq!(view.pills[0].label(), "Teammate");
}

#[test]
fn test_orbit_level_pill_and_last_active() {
    let mut member = MemberRecord::new("Ada");
    member.orbit_level = Some(OrbitLevel::Level(2));
    member.last_activity_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let view = MemberView::build(&member, DisplayLimits::default(), false, false);

    let labels: Vec<String> = view.pills.iter().map(Pill::label).collect();
    assert_eq!(labels, vec!["Orbit Level: 2", "Last active: Mar 1, 2024"]);
    assert!(!view.pills.contains(&Pill::Teammate));
}

#[test]
fn test_unknown_level_has_no_pill() {
    let view = MemberView::build(&MemberRecord::new("Ada"), DisplayLimits::default(), false, false);
    assert!(view.pills.is_empty());
}

#[test]
fn test_tags_truncated_with_more_label() {
    let member = member_with_tags(6);
    let collapsed = MemberView::build(&member, DisplayLimits::default(), false, false);
    assert_eq!(collapsed.tags.items, vec!["tag-1", "tag-2", "tag-3"]);
    assert_eq!(collapsed.tags.hidden, 3);
    assert_eq!(collapsed.tags.toggle_label().as_deref(), Some("3 more"));

    let expanded = MemberView::build(&member, DisplayLimits::default(), true, false);
    assert_eq!(expanded.tags.items.len(), 6);
    assert_eq!(expanded.tags.hidden, 0);
    assert_eq!(expanded.tags.toggle_label(), None);
}

#[test]
fn test_tags_at_limit_have_no_toggle() {
    let view = MemberView::build(&member_with_tags(3), DisplayLimits::default(), true, false);
    assert_eq!(view.tags.items.len(), 3);
    assert_eq!(view.tags.toggle_label(), None);
}

#[test]
fn test_identity_badges_skip_handleless() {
    let mut member = MemberRecord::new("Ada");
    member.identities = vec![
        Identity {
            source: IdentitySource::Github,
            username: Some("ada".to_string()),
            email: None,
            profile_url: Some("https://github.com/ada".to_string()),
        },
        Identity {
            source: IdentitySource::Slack,
            username: None,
            email: None,
            profile_url: None,
        },
        Identity {
            source: IdentitySource::Email,
            username: None,
            email: Some("ada@example.com".to_string()),
            profile_url: None,
        },
    ];
    let limits = DisplayLimits {
        tag_limit: 3,
        identity_limit: 1,
    };
    let view = MemberView::build(&member, limits, false, false);
    assert_eq!(view.identities.items.len(), 1);
    assert_eq!(view.identities.items[0].handle, "ada");
    assert_eq!(view.identities.toggle_label().as_deref(), Some("1 more"));
}

#[test]
fn test_view_messages() {
    assert!(WidgetView::Idle.message().is_none());
    assert!(WidgetView::AuthError.message().unwrap().contains("API token"));
    assert!(WidgetView::NotAMember.message().unwrap().contains("not a member"));
}

#[test]
fn test_display_limits_from_config() {
    let config = orbitlens_config::WidgetConfig {
        tag_limit: 7,
        identity_limit: 2,
    };
    assert_eq!(
        DisplayLimits::from(&config),
        DisplayLimits {
            tag_limit: 7,
            identity_limit: 2
        }
    );
}

// ------------------------------------------------------------------
// Element state machine
// ------------------------------------------------------------------

#[tokio::test]
async fn test_trigger_fetches_once() {
    let source = FakeSource::new().with_response(
        "grace",
        MemberDataResponse::found(MemberRecord::new("Grace Hopper")),
    );
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");

    widget.trigger().await;
    widget.trigger().await;
    widget.trigger().await;

    assert_eq!(page.source.calls(), 1);
    assert_eq!(widget.phase(), WidgetPhase::Member);
    assert_eq!(widget.load_state(), LoadState::Loaded);
}

#[tokio::test]
async fn test_no_second_fetch_while_loading() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::new()
        .with_response("grace", MemberDataResponse::found(MemberRecord::new("Grace")))
        .gated(gate.clone());
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");

    let pending = tokio::spawn({
        let widget = widget.clone();
        async move { widget.trigger().await }
    });
    while page.source.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(widget.phase(), WidgetPhase::Loading);
    assert_eq!(page.attr(page.dropdown(&widget), "data-state").as_deref(), Some("loading"));

    widget.trigger().await;
    assert_eq!(widget.phase(), WidgetPhase::Loading);

    gate.notify_one();
    pending.await.unwrap();

    assert_eq!(page.source.calls(), 1);
    assert_eq!(widget.phase(), WidgetPhase::Member);
}

#[tokio::test]
async fn test_missing_credentials_is_auth_error_without_fetch() {
    let page = Page::new(FakeSource::new(), FixedStore::empty());
    let widget = page.widget("grace");

    widget.trigger().await;

    assert_eq!(widget.phase(), WidgetPhase::AuthError);
    assert_eq!(page.source.calls(), 0);
    let dropdown = page.dropdown(&widget);
    assert_eq!(page.attr(dropdown, "data-state").as_deref(), Some("authError"));
    assert!(page.find(dropdown, "[data-action=\"open-settings\"]").is_some());
}

#[tokio::test]
async fn test_status_codes_reach_their_states() {
    let source = FakeSource::new()
        .with_response("grace", MemberDataResponse::failed(401))
        .with_response("linus", MemberDataResponse::failed(500));
    let page = Page::new(source, FixedStore::configured());

    let grace = page.widget("grace");
    let linus = page.widget("linus");
    grace.trigger().await;
    linus.trigger().await;

    assert_eq!(grace.phase(), WidgetPhase::AuthError);
    assert_eq!(linus.phase(), WidgetPhase::OtherError);
    assert_eq!(page.source.calls(), 2);
}

#[tokio::test]
async fn test_unknown_member_is_not_a_member() {
    let page = Page::new(FakeSource::new(), FixedStore::configured());
    let widget = page.widget("grace");
    widget.trigger().await;
    assert_eq!(widget.phase(), WidgetPhase::NotAMember);
}

#[tokio::test]
async fn test_transport_error_is_other_error() {
    let page = Page::new(FakeSource::failing(), FixedStore::configured());
    let widget = page.widget("linus");
    widget.trigger().await;
    assert_eq!(widget.phase(), WidgetPhase::OtherError);
    assert!(widget.view().message().unwrap().contains("went wrong"));
}

#[tokio::test]
async fn test_member_render() {
    let mut member = member_with_tags(6);
    member.orbit_level = Some(OrbitLevel::Teammate);
    member.job_title = Some("Rear Admiral".to_string());
    let source = FakeSource::new().with_response(
        "grace",
        MemberDataResponse::found(member)
            .with_additional_data(serde_json::json!({"contributions": 12})),
    );
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");
    widget.trigger().await;

    let dropdown = page.dropdown(&widget);
    assert_eq!(page.attr(dropdown, "data-state").as_deref(), Some("member"));
    assert_eq!(page.texts(dropdown, ".obe-member-name"), vec!["Grace Hopper"]);
    assert_eq!(page.texts(dropdown, ".obe-member-title"), vec!["Rear Admiral"]);
    assert_eq!(page.texts(dropdown, ".obe-pill"), vec!["Teammate"]);
    assert_eq!(page.texts(dropdown, ".obe-tag").len(), 3);
    assert_eq!(
        page.texts(dropdown, "[data-action=\"show-more-tags\"]"),
        vec!["3 more"]
    );

    let extra = page
        .find(widget.node(), "obe-github-additional-data")
        .unwrap();
    assert_eq!(
        page.attr(extra, "data-payload").as_deref(),
        Some(r#"{"contributions":12}"#)
    );
}

#[tokio::test]
async fn test_rerender_keeps_single_dropdown_and_style() {
    let page = Page::new(FakeSource::new(), FixedStore::configured());
    let widget = page.widget("grace");
    widget.toggle_dropdown();
    widget.toggle_dropdown();
    widget.trigger().await;

    page.host().document().read(|doc| {
        assert_eq!(dropdowns(doc, widget.node()).len(), 1);
        let styles = doc.query_selector_all(widget.node(), "style").unwrap();
        assert_eq!(styles.len(), 1);
    });
}

// ------------------------------------------------------------------
// Host dispatch
// ------------------------------------------------------------------

#[tokio::test]
async fn test_click_button_opens_and_loads() {
    let source = FakeSource::new().with_response(
        "grace",
        MemberDataResponse::found(MemberRecord::new("Grace")),
    );
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");
    let button = page
        .host()
        .document()
        .read(|doc| find_slot(doc, widget.node(), BUTTON_SLOT))
        .unwrap();

    page.host().click(button).await;

    assert!(widget.is_open());
    assert_eq!(widget.phase(), WidgetPhase::Member);
    assert_eq!(page.attr(page.dropdown(&widget), "data-open").as_deref(), Some("true"));

    // Second click closes without another fetch.
    page.host().click(button).await;
    assert!(!widget.is_open());
    assert_eq!(page.source.calls(), 1);
}

#[tokio::test]
async fn test_click_outside_closes_every_dropdown() {
    let page = Page::new(FakeSource::new(), FixedStore::configured());
    let grace = page.widget("grace");
    let linus = page.widget("linus");
    grace.toggle_dropdown();
    linus.toggle_dropdown();

    let body = page.host().document().read(|doc| doc.body()).unwrap();
    page.host().click(body).await;

    assert!(!grace.is_open());
    assert!(!linus.is_open());
    // Closing never starts or resets a load.
    assert_eq!(grace.phase(), WidgetPhase::Idle);
}

#[tokio::test]
async fn test_click_inside_one_widget_closes_the_other() {
    let page = Page::new(FakeSource::new(), FixedStore::configured());
    let grace = page.widget("grace");
    let linus = page.widget("linus");
    linus.toggle_dropdown();

    let button = page
        .host()
        .document()
        .read(|doc| find_slot(doc, grace.node(), BUTTON_SLOT))
        .unwrap();
    page.host().click(button).await;

    assert!(grace.is_open());
    assert!(!linus.is_open());
}

#[tokio::test]
async fn test_show_more_tags_expands_without_refetch() {
    let source = FakeSource::new()
        .with_response("grace", MemberDataResponse::found(member_with_tags(6)));
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");
    widget.trigger().await;

    let toggle = page
        .find(page.dropdown(&widget), "[data-action=\"show-more-tags\"]")
        .unwrap();
    page.host().click(toggle).await;

    let dropdown = page.dropdown(&widget);
    assert_eq!(page.texts(dropdown, ".obe-tag").len(), 6);
    assert!(page.texts(dropdown, "[data-action=\"show-more-tags\"]").is_empty());
    assert_eq!(page.source.calls(), 1);
    assert_eq!(widget.phase(), WidgetPhase::Member);
}

#[tokio::test]
async fn test_open_settings_action() {
    let page = Page::new(FakeSource::new(), FixedStore::empty());
    let widget = page.widget("grace");
    widget.trigger().await;

    let action = page
        .find(page.dropdown(&widget), "[data-action=\"open-settings\"]")
        .unwrap();
    page.host().click(action).await;

    assert_eq!(page.store.settings_opened.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_hover_prefetches_once() {
    let page = Page::new(FakeSource::new(), FixedStore::configured());
    let widget = page.widget("linus");
    let button = page
        .host()
        .document()
        .read(|doc| find_slot(doc, widget.node(), BUTTON_SLOT))
        .unwrap();

    page.host().hover(button).await;
    page.host().hover(widget.node()).await;

    assert_eq!(page.source.calls(), 1);
    assert_eq!(widget.phase(), WidgetPhase::NotAMember);
    assert_eq!(page.widget("grace").phase(), WidgetPhase::Idle);
}

#[tokio::test]
async fn test_detached_widget_still_finishes() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::new().gated(gate.clone());
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");

    let pending = tokio::spawn({
        let widget = widget.clone();
        async move { widget.trigger().await }
    });
    while page.source.calls() == 0 {
        tokio::task::yield_now().await;
    }

    // A rerun replaces the widget while its fetch is in flight.
    let adapter = ZoneAdapter::new();
    page.host()
        .document()
        .mutate(|doc| page.orchestrator.add_widget_elements(doc, &adapter, Platform::Github));
    assert!(page.host().get(widget.node()).is_none());

    gate.notify_one();
    pending.await.unwrap();
    assert_eq!(widget.phase(), WidgetPhase::NotAMember);
    assert_eq!(page.widget("grace").phase(), WidgetPhase::Idle);
}

#[tokio::test]
async fn test_attach_mounts_standalone_widget() {
    let page = Page::new(
        FakeSource::new().with_response("ada", MemberDataResponse::found(member_with_tags(1))),
        FixedStore::configured(),
    );
    let body = page.host().document().read(|doc| doc.body()).unwrap();

    let widget = page
        .host()
        .attach(body, MemberDataRequest::new("ada", Platform::Twitter))
        .unwrap();

    assert_eq!(page.host().len(), 3);
    page.host().document().read(|doc| {
        assert_eq!(doc.parent(widget.node()), Some(body));
        assert_eq!(doc.attribute(widget.node(), "platform"), Some("twitter"));
        assert!(find_slot(doc, widget.node(), BUTTON_SLOT).is_some());
    });

    widget.trigger().await;
    assert_eq!(widget.phase(), WidgetPhase::Member);
}

#[tokio::test]
async fn test_show_more_identities_is_one_way() {
    let mut member = MemberRecord::new("Grace Hopper");
    member.identities = (1..=7)
        .map(|i| Identity {
            source: IdentitySource::Github,
            username: Some(format!("grace-{}", i)),
            email: None,
            profile_url: None,
        })
        .collect();
    let source = FakeSource::new().with_response("grace", MemberDataResponse::found(member));
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");
    widget.trigger().await;

    let selector = "[data-action=\"show-more-identities\"]";
    let dropdown = page.dropdown(&widget);
    assert_eq!(page.texts(dropdown, ".obe-identity").len(), 5);
    assert_eq!(page.texts(dropdown, selector), vec!["2 more"]);

    let toggle = page.find(dropdown, selector).unwrap();
    page.host().click(toggle).await;
    widget.expand_identities();

    let dropdown = page.dropdown(&widget);
    assert_eq!(page.texts(dropdown, ".obe-identity").len(), 7);
    assert!(page.texts(dropdown, selector).is_empty());
    match widget.view() {
        WidgetView::Member(view) => {
            assert_eq!(view.identities.hidden, 0);
            assert_eq!(view.identities.toggle_label(), None);
        }
        other => panic!("expected member view, got {:?}", other),
    }
    assert_eq!(page.source.calls(), 1);
}

#[tokio::test]
async fn test_repeated_renders_keep_arena_bounded() {
    let source = FakeSource::new().with_response(
        "grace",
        MemberDataResponse::found(member_with_tags(12)),
    );
    let page = Page::new(source, FixedStore::configured());
    let widget = page.widget("grace");
    widget.trigger().await;
    widget.toggle_dropdown();
    let count = page.node_count();

    for _ in 0..500 {
        widget.toggle_dropdown();
        widget.toggle_dropdown();
    }
    assert_eq!(page.node_count(), count);
    assert!(widget.is_open());
    page.host().document().read(|doc| {
        assert_eq!(dropdowns(doc, widget.node()).len(), 1);
    });
}

#[tokio::test]
async fn test_in_flight_widget_freed_after_its_fetch() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::new().gated(gate.clone());
    let page = Page::new(source, FixedStore::configured());
    let old = page.widget("grace");
    let node = old.node();

    let pending = tokio::spawn(async move { old.trigger().await });
    while page.source.calls() == 0 {
        tokio::task::yield_now().await;
    }

    page.rerun();
    page.rerun();
    assert!(page.host().get(node).is_none());
    assert!(page.host().document().read(|doc| doc.node(node).is_some()));

    gate.notify_one();
    pending.await.unwrap();
    page.host().document().read(|doc| {
        assert_eq!(doc.attribute(node, "username"), Some("grace"));
        assert!(!doc.is_connected(node));
    });

    page.rerun();
    assert!(page.host().document().read(|doc| doc.node(node).is_none()));
    assert_eq!(page.host().retired_len(), 2);
}
