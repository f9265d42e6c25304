//! Site integration registration for OrbitLens.

use std::sync::Arc;

use tracing::{debug, info, warn};

use orbitlens_config::Config;
use orbitlens_core::SiteRegistry;
use orbitlens_protocols::SiteIntegration;
use orbitlens_site_github::GitHubSite;
use orbitlens_site_gmail::GmailSite;
use orbitlens_site_linkedin::LinkedInSite;
use orbitlens_site_twitter::TwitterSite;

/// Register every built-in site whose platform is not disabled in `config.sites`.
pub(crate) fn build_registry(config: &Config) -> SiteRegistry {
    let registry = SiteRegistry::new();
    let sites: [Arc<dyn SiteIntegration>; 4] = [
        Arc::new(GitHubSite::new()),
        Arc::new(GmailSite::new()),
        Arc::new(TwitterSite::new()),
        Arc::new(LinkedInSite::new()),
    ];

    for site in sites {
        let id = site.manifest().id.clone();
        if !config.sites.is_enabled(site.manifest().platform.as_str()) {
            debug!(site = %id, "Site disabled by configuration");
            continue;
        }
        match registry.register(site) {
            Ok(()) => debug!(site = %id, "Registered site"),
            Err(e) => warn!(site = %id, error = %e, "Failed to register site"),
        }
    }

    info!(sites = ?registry.list_ids(), "Site registry ready");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sites_registered_by_default() {
        let registry = build_registry(&Config::default());
        assert_eq!(
            registry.list_ids(),
            vec!["site-github", "site-gmail", "site-linkedin", "site-twitter"]
        );
        assert!(registry.for_host("x.com").is_ok());
    }

    #[test]
    fn test_disabled_site_is_skipped() {
        let mut config = Config::default();
        config.sites.disabled = vec!["LinkedIn".to_string()];
        let registry = build_registry(&config);
        assert!(!registry.contains("site-linkedin"));
        assert!(registry.for_host("www.linkedin.com").is_err());
        assert_eq!(registry.len(), 3);
    }
}
