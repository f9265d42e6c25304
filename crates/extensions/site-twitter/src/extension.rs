//! Twitter/X site integration.

use std::sync::Arc;

use orbitlens_protocols::{
    NavigationStrategy, PageAdapter, Platform, SiteIntegration, SiteManifest, Version,
};

use crate::TwitterProfilePage;

/// Twitter re-renders in place without a routing event; the document
/// title changes with every profile.
pub struct TwitterSite {
    manifest: SiteManifest,
}

impl TwitterSite {
    pub fn new() -> Self {
        let manifest = SiteManifest::new(
            "site-twitter",
            "Twitter",
            Version::new(0, 1, 0),
            Platform::Twitter,
        )
        .with_description("Profile name block")
        .with_hosts(["twitter.com", "x.com"]);
        Self { manifest }
    }
}

impl Default for TwitterSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteIntegration for TwitterSite {
    fn manifest(&self) -> &SiteManifest {
        &self.manifest
    }

    fn adapters(&self) -> Vec<Arc<dyn PageAdapter>> {
        vec![Arc::new(TwitterProfilePage::new())]
    }

    fn navigation(&self) -> NavigationStrategy {
        NavigationStrategy::landmark("title")
    }
}
