//! Gmail site integration.

use std::sync::Arc;

use orbitlens_protocols::{
    NavigationStrategy, PageAdapter, Platform, SiteIntegration, SiteManifest, Version,
};

use crate::GmailEmailThreadPage;

/// Gmail switches threads by rewriting the location hash.
pub struct GmailSite {
    manifest: SiteManifest,
}

impl GmailSite {
    pub fn new() -> Self {
        let manifest =
            SiteManifest::new("site-gmail", "Gmail", Version::new(0, 1, 0), Platform::Gmail)
                .with_description("Message headers in open threads")
                .with_hosts(["mail.google.com"]);
        Self { manifest }
    }
}

impl Default for GmailSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteIntegration for GmailSite {
    fn manifest(&self) -> &SiteManifest {
        &self.manifest
    }

    fn adapters(&self) -> Vec<Arc<dyn PageAdapter>> {
        vec![Arc::new(GmailEmailThreadPage::new())]
    }

    fn navigation(&self) -> NavigationStrategy {
        NavigationStrategy::HashChange
    }
}
