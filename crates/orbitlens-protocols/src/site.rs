//! Site integrations: a site's adapters plus how it signals navigation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::adapter::PageAdapter;
use crate::types::{Platform, Version};

/// Page lifecycle signal delivered to a content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Initial document load.
    DomContentLoaded,
    /// Site-specific "client-side navigation completed" event, e.g. `pjax:end`.
    Navigation(String),
    /// Location hash changed.
    HashChange,
}

/// How a site tells us it re-rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationStrategy {
    /// Named custom events dispatched by the site's router.
    Events { names: Vec<String> },
    /// Hash-routed single page app.
    HashChange,
    /// No navigation hook: watch a stable landmark element for mutations.
    Landmark { selector: String },
}

impl NavigationStrategy {
    pub fn events<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NavigationStrategy::Events {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn landmark(selector: impl Into<String>) -> Self {
        NavigationStrategy::Landmark {
            selector: selector.into(),
        }
    }

    /// Whether `event` should trigger an orchestration pass.
    /// Initial load always does.
    pub fn is_triggered_by(&self, event: &LifecycleEvent) -> bool {
        match (self, event) {
            (_, LifecycleEvent::DomContentLoaded) => true,
            (NavigationStrategy::Events { names }, LifecycleEvent::Navigation(name)) => {
                names.iter().any(|n| n == name)
            }
            (NavigationStrategy::HashChange, LifecycleEvent::HashChange) => true,
            _ => false,
        }
    }
}

/// Site integration metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    pub id: String,
    pub name: String,
    pub version: Version,
    pub description: String,
    pub platform: Platform,
    /// Host names this integration runs on.
    pub hosts: Vec<String>,
}

impl SiteManifest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: Version,
        platform: Platform,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version,
            description: String::new(),
            platform,
            hosts: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }
}

/// One supported site: adapters in priority order and its navigation signal.
pub trait SiteIntegration: Send + Sync {
    fn manifest(&self) -> &SiteManifest;

    /// Adapters ordered most- to least-specific.
    fn adapters(&self) -> Vec<Arc<dyn PageAdapter>>;

    fn navigation(&self) -> NavigationStrategy;

    /// Whether this integration runs on `host` (exact or subdomain match).
    fn handles_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.manifest().hosts.iter().any(|h| {
            host == *h || host.strip_suffix(h.as_str()).is_some_and(|p| p.ends_with('.'))
        })
    }
}
