//! Site integration registry.

use std::sync::Arc;

use dashmap::DashMap;
use orbitlens_protocols::{SiteError, SiteIntegration};

/// Site integrations keyed by manifest id.
pub struct SiteRegistry {
    sites: DashMap<String, Arc<dyn SiteIntegration>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self {
            sites: DashMap::new(),
        }
    }

    /// Register a site integration.
    ///
    /// Returns an error if one with the same id is already registered.
    pub fn register(&self, site: Arc<dyn SiteIntegration>) -> Result<(), SiteError> {
        let id = site.manifest().id.clone();

        if self.sites.contains_key(&id) {
            return Err(SiteError::AlreadyRegistered(id));
        }

        self.sites.insert(id, site);
        Ok(())
    }

    pub fn unregister(&self, id: &str) -> Result<(), SiteError> {
        self.sites
            .remove(id)
            .ok_or_else(|| SiteError::NotFound(id.to_string()))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn SiteIntegration>> {
        self.sites.get(id).map(|site| site.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sites.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sites.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Integration whose manifest lists `host`. Hosts are disjoint across
    /// sites, so the first match wins.
    pub fn for_host(&self, host: &str) -> Result<Arc<dyn SiteIntegration>, SiteError> {
        self.sites
            .iter()
            .find(|entry| entry.value().handles_host(host))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SiteError::UnsupportedHost(host.to_string()))
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
