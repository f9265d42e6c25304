//! One page's content-script session.

use std::sync::Arc;

use orbitlens_config::Config;
use orbitlens_core::{
    CredentialContext, DisplayLimits, Orchestrator, PassReport, WidgetHost, WidgetServices,
    detect_page,
};
use orbitlens_dom::LiveDocument;
use orbitlens_protocols::{
    CredentialStore, LifecycleEvent, MemberDataSource, NavigationStrategy, PageAdapter,
    SiteIntegration,
};
use tracing::{debug, info};

use crate::error::WatchError;
use crate::watcher::{LandmarkWatcher, WatchHandle};

/// Binds a live document to a site integration and runs orchestration
/// passes on lifecycle signals.
pub struct ContentScript {
    doc: LiveDocument,
    site: Arc<dyn SiteIntegration>,
    adapters: Vec<Arc<dyn PageAdapter>>,
    orchestrator: Orchestrator,
}

impl ContentScript {
    pub fn new(doc: LiveDocument, site: Arc<dyn SiteIntegration>, services: WidgetServices) -> Self {
        let host = Arc::new(WidgetHost::new(doc.clone(), services));
        let adapters = site.adapters();
        Self {
            doc,
            site,
            adapters,
            orchestrator: Orchestrator::new(host),
        }
    }

    /// Session wired from configuration: credentials are read once here.
    pub fn from_config(
        doc: LiveDocument,
        site: Arc<dyn SiteIntegration>,
        source: Arc<dyn MemberDataSource>,
        store: Arc<dyn CredentialStore>,
        config: &Config,
    ) -> Self {
        let credentials = Arc::new(CredentialContext::load(store));
        let services = WidgetServices::new(source, credentials)
            .with_limits(DisplayLimits::from(&config.widget));
        Self::new(doc, site, services)
    }

    pub fn document(&self) -> &LiveDocument {
        &self.doc
    }

    pub fn site(&self) -> &Arc<dyn SiteIntegration> {
        &self.site
    }

    pub fn host(&self) -> &Arc<WidgetHost> {
        self.orchestrator.host()
    }

    /// Name of the adapter matching the current page, if any.
    pub fn detected_adapter(&self) -> Option<String> {
        self.doc
            .read(|doc| detect_page(doc, &self.adapters).map(|a| a.name().to_string()))
    }

    /// Detect the page kind and add widget elements. `None` when no adapter
    /// claims the page.
    pub fn run_pass(&self) -> Option<PassReport> {
        let report = self.doc.mutate(|doc| {
            let adapter = detect_page(doc, &self.adapters)?;
            debug!(adapter = adapter.name(), "Page detected");
            Some(
                self.orchestrator
                    .add_widget_elements(doc, adapter.as_ref(), adapter.platform()),
            )
        });
        if report.is_none() {
            debug!(site = %self.site.manifest().id, "No adapter matches this page");
        }
        report
    }

    /// Run a pass if `event` is one of this site's signals.
    pub fn handle_event(&self, event: &LifecycleEvent) -> Option<PassReport> {
        if !self.site.navigation().is_triggered_by(event) {
            debug!(?event, "Event ignored");
            return None;
        }
        self.run_pass()
    }

    /// Initial load. Event-driven sites get their first pass now;
    /// landmark-driven sites get a watcher that runs it once the landmark
    /// exists, so a page whose landmark never shows stays untouched.
    pub fn boot(
        self: &Arc<Self>,
        config: &Config,
    ) -> Result<(Option<PassReport>, Option<WatchHandle>), WatchError> {
        let url = self.doc.read(|doc| doc.location().to_string());
        info!(site = %self.site.manifest().id, url = %url, "Content script started");

        match self.site.navigation() {
            NavigationStrategy::Landmark { selector } => {
                let watcher = LandmarkWatcher::new(
                    self.clone(),
                    &selector,
                    config.watcher.landmark_timeout(),
                )?;
                Ok((None, Some(watcher.start())))
            }
            _ => Ok((self.handle_event(&LifecycleEvent::DomContentLoaded), None)),
        }
    }
}
