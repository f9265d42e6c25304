//! Widget orchestration: one widget instance per valid zone.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use orbitlens_dom::{Document, DomError, NodeId};
use orbitlens_protocols::{MemberDataRequest, PageAdapter, Platform};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::instance::{build_widget, widgets_in};
use crate::widget::WidgetHost;

/// Why a zone got no widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidZone,
    MissingUsername,
    MissingInsertionPoint,
    InsertFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::InvalidZone => "zone failed validation",
            SkipReason::MissingUsername => "no username found",
            SkipReason::MissingInsertionPoint => "no insertion point found",
            SkipReason::InsertFailed => "insertion failed",
        };
        f.write_str(s)
    }
}

/// A widget placed in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Injection {
    pub zone: NodeId,
    pub widget: NodeId,
    pub username: String,
}

/// What one pass did. Informational only: the pass itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub zones: usize,
    pub injected: Vec<Injection>,
    /// Existing widgets removed before re-injection.
    pub replaced: usize,
    pub skipped: Vec<(NodeId, SkipReason)>,
}

/// First adapter, in caller order, that claims the page.
pub fn detect_page<'a>(
    doc: &Document,
    adapters: &'a [Arc<dyn PageAdapter>],
) -> Option<&'a Arc<dyn PageAdapter>> {
    adapters.iter().find(|adapter| adapter.detect(doc))
}

/// Injects widget instances for an adapter and hands their state machines
/// to the [`WidgetHost`].
pub struct Orchestrator {
    host: Arc<WidgetHost>,
}

impl Orchestrator {
    pub fn new(host: Arc<WidgetHost>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Arc<WidgetHost> {
        &self.host
    }

    /// Run a pass over every zone the adapter reports.
    ///
    /// Safe to repeat: existing widgets in a zone are replaced, so each
    /// zone ends up with at most one. A zone that fails a check is skipped
    /// and the pass moves on.
    pub fn add_widget_elements(
        &self,
        doc: &mut Document,
        adapter: &dyn PageAdapter,
        platform: Platform,
    ) -> PassReport {
        let reclaimed = self.host.reclaim(doc);
        if reclaimed > 0 {
            debug!(adapter = adapter.name(), reclaimed, "Freed replaced widgets");
        }

        let mut report = PassReport::default();
        let mut seen = HashSet::new();
        let zones: Vec<NodeId> = adapter
            .find_widget_zones(doc)
            .into_iter()
            .filter(|zone| seen.insert(*zone))
            .collect();
        report.zones = zones.len();

        for zone in zones {
            report.replaced += self.remove_existing(doc, zone);

            if !adapter.validate_widget_zone(doc, zone) {
                debug!(adapter = adapter.name(), zone = %zone, "Zone failed validation");
                report.skipped.push((zone, SkipReason::InvalidZone));
                continue;
            }

            adapter.apply_css_patch(doc, zone);

            let Some(username) = adapter
                .find_username(doc, zone)
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
            else {
                debug!(adapter = adapter.name(), zone = %zone, "No username in zone");
                report.skipped.push((zone, SkipReason::MissingUsername));
                continue;
            };

            let Some(point) = adapter.find_insertion_point(doc, zone) else {
                debug!(adapter = adapter.name(), zone = %zone, "No insertion point in zone");
                report.skipped.push((zone, SkipReason::MissingInsertionPoint));
                continue;
            };

            match self.inject(doc, point, &username, platform) {
                Ok(widget) => report.injected.push(Injection {
                    zone,
                    widget,
                    username,
                }),
                Err(e) => {
                    warn!(adapter = adapter.name(), zone = %zone, error = %e, "Widget insertion failed");
                    report.skipped.push((zone, SkipReason::InsertFailed));
                }
            }
        }

        info!(
            adapter = adapter.name(),
            zones = report.zones,
            injected = report.injected.len(),
            replaced = report.replaced,
            skipped = report.skipped.len(),
            "Widget pass complete"
        );
        report
    }

    fn remove_existing(&self, doc: &mut Document, zone: NodeId) -> usize {
        let mut removed = 0;
        for widget in widgets_in(doc, zone) {
            if let Err(e) = doc.remove(widget) {
                debug!(widget = %widget, error = %e, "Stale widget already gone");
            }
            self.host.release(doc, widget);
            removed += 1;
        }
        removed
    }

    fn inject(
        &self,
        doc: &mut Document,
        point: NodeId,
        username: &str,
        platform: Platform,
    ) -> Result<NodeId, DomError> {
        let widget = build_widget(doc, username, platform)?;
        let mounted = self
            .host
            .create(doc, widget, MemberDataRequest::new(username, platform))
            .and_then(|element| doc.prepend(point, widget).map(|()| element));
        match mounted {
            Ok(element) => {
                self.host.register(element);
                Ok(widget)
            }
            Err(e) => {
                if let Err(release_err) = doc.release(widget) {
                    debug!(widget = %widget, error = %release_err, "Unmounted widget not released");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
