use super::*;
use orbitlens_dom::{PageSnapshot, SnapshotNode};

fn top_card(with_actions: bool) -> SnapshotNode {
    let mut card = SnapshotNode::element("section")
        .attr("class", "artdeco-card pv-top-card")
        .child(SnapshotNode::element("h1").with_text("Ada Lovelace"));
    if with_actions {
        card = card.child(SnapshotNode::element("div").class("pvs-profile-actions"));
    }
    card
}

fn profile(url: &str, cards: Vec<SnapshotNode>) -> Document {
    PageSnapshot::with_body(url, Some("Ada Lovelace | LinkedIn"), cards)
        .into_document()
        .unwrap()
}

#[test]
fn test_detect_profile_paths() {
    let adapter = LinkedInProfilePage::new();
    assert!(adapter.detect(&profile("https://www.linkedin.com/in/ada-lovelace", vec![])));
    assert!(adapter.detect(&profile("https://www.linkedin.com/in/ada-lovelace/", vec![])));
    assert!(!adapter.detect(&profile("https://www.linkedin.com/feed/", vec![])));
    assert!(!adapter.detect(&profile(
        "https://www.linkedin.com/in/ada-lovelace/details/skills/",
        vec![]
    )));
}

#[test]
fn test_username_is_decoded_slug() {
    let adapter = LinkedInProfilePage::new();
    let doc = profile(
        "https://www.linkedin.com/in/ren%C3%A9-dupont/",
        vec![top_card(true)],
    );
    let zone = adapter.find_widget_zones(&doc)[0];
    assert_eq!(adapter.find_username(&doc, zone).as_deref(), Some("rené-dupont"));
}

#[test]
fn test_validation_requires_actions() {
    let adapter = LinkedInProfilePage::new();
    let doc = profile(
        "https://www.linkedin.com/in/ada",
        vec![top_card(true), top_card(false)],
    );
    let zones = adapter.find_widget_zones(&doc);

    assert_eq!(zones.len(), 2);
    assert!(adapter.validate_widget_zone(&doc, zones[0]));
    assert!(!adapter.validate_widget_zone(&doc, zones[1]));

    let point = adapter.find_insertion_point(&doc, zones[0]).unwrap();
    assert!(doc.has_class(point, "pvs-profile-actions"));
    assert!(adapter.find_insertion_point(&doc, zones[1]).is_none());
}

#[test]
fn test_css_patch_on_zone() {
    let adapter = LinkedInProfilePage::new();
    let mut doc = profile("https://www.linkedin.com/in/ada", vec![top_card(true)]);
    let zone = adapter.find_widget_zones(&doc)[0];
    adapter.apply_css_patch(&mut doc, zone);
    assert_eq!(doc.style_property(zone, "z-index").as_deref(), Some("2"));
}
