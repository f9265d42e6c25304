//! GitHub site integration.

use std::sync::Arc;

use orbitlens_protocols::{
    NavigationStrategy, PageAdapter, Platform, SiteIntegration, SiteManifest, Version,
};

use crate::{GitHubDiscussionPage, GitHubIssueOrPullRequestPage};

/// GitHub navigates with pjax and Turbo, both of which fire an event once
/// the new page is rendered.
pub struct GitHubSite {
    manifest: SiteManifest,
}

impl GitHubSite {
    pub fn new() -> Self {
        let manifest = SiteManifest::new(
            "site-github",
            "GitHub",
            Version::new(0, 1, 0),
            Platform::Github,
        )
        .with_description("Issue, pull request and discussion comment headers")
        .with_hosts(["github.com"]);
        Self { manifest }
    }
}

impl Default for GitHubSite {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteIntegration for GitHubSite {
    fn manifest(&self) -> &SiteManifest {
        &self.manifest
    }

    fn adapters(&self) -> Vec<Arc<dyn PageAdapter>> {
        vec![
            Arc::new(GitHubIssueOrPullRequestPage::new()),
            Arc::new(GitHubDiscussionPage::new()),
        ]
    }

    fn navigation(&self) -> NavigationStrategy {
        NavigationStrategy::events(["pjax:end", "turbo:render"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitlens_protocols::LifecycleEvent;

    #[test]
    fn test_manifest() {
        let site = GitHubSite::new();
        assert_eq!(site.manifest().id, "site-github");
        assert_eq!(site.manifest().platform, Platform::Github);
        assert!(site.handles_host("github.com"));
        assert!(!site.handles_host("gitlab.com"));
    }

    #[test]
    fn test_adapter_priority() {
        let names: Vec<String> = GitHubSite::new()
            .adapters()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["GitHubIssueOrPullRequestPage", "GitHubDiscussionPage"]);
    }

    #[test]
    fn test_navigation_events() {
        let nav = GitHubSite::new().navigation();
        assert!(nav.is_triggered_by(&LifecycleEvent::Navigation("pjax:end".to_string())));
        assert!(nav.is_triggered_by(&LifecycleEvent::Navigation("turbo:render".to_string())));
        assert!(!nav.is_triggered_by(&LifecycleEvent::HashChange));
    }
}
