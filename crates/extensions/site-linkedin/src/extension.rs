//! LinkedIn site integration.

use std::sync::Arc;

use orbitlens_protocols::{
    NavigationStrategy, PageAdapter, Platform, SiteIntegration, SiteManifest, Version,
};

use crate::LinkedInProfilePage;

/// LinkedIn is a single-page app without a usable routing event; the
/// document title tracks the profile being shown.
pub struct LinkedInSite {
    manifest: SiteManifest,
}

impl LinkedInSite {
    pub fn new() -> Self {
        let manifest = SiteManifest::new(
            "site-linkedin",
            "LinkedIn",
            Version::new(0, 1, 0),
            Platform::Linkedin,
        )
        .with_description("Profile top card")
        .with_hosts(["linkedin.com"]);
        Self { manifest }
    }
}

impl Default for LinkedInSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteIntegration for LinkedInSite {
    fn manifest(&self) -> &SiteManifest {
        &self.manifest
    }

    fn adapters(&self) -> Vec<Arc<dyn PageAdapter>> {
        vec![Arc::new(LinkedInProfilePage::new())]
    }

    fn navigation(&self) -> NavigationStrategy {
        NavigationStrategy::landmark("title")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosts() {
        let site = LinkedInSite::new();
        assert!(site.handles_host("www.linkedin.com"));
        assert!(site.handles_host("linkedin.com"));
        assert!(!site.handles_host("linkedin.com.evil.test"));
    }
}
