//! Credential context shared by every widget on a page.

use std::sync::Arc;

use orbitlens_config::CredentialsConfig;
use orbitlens_protocols::{CredentialStore, Credentials, FetchContext};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Credentials read once from a [`CredentialStore`] and cached.
///
/// The cache only changes through [`CredentialContext::invalidate`], so a
/// widget that is mid-fetch never sees a different token than the one it
/// started with.
pub struct CredentialContext {
    store: Arc<dyn CredentialStore>,
    cached: RwLock<Option<Credentials>>,
}

impl CredentialContext {
    pub fn load(store: Arc<dyn CredentialStore>) -> Self {
        let cached = read_store(store.as_ref());
        Self {
            store,
            cached: RwLock::new(cached),
        }
    }

    pub fn are_credentials_configured(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Current cached credentials, if complete.
    pub fn snapshot(&self) -> Option<Credentials> {
        self.cached.read().clone()
    }

    /// Fetch context for one member-data request, `None` when unconfigured.
    pub fn fetch_context(&self) -> Option<FetchContext> {
        self.snapshot().map(FetchContext::new)
    }

    /// Settings changed: drop the cache and read the store again.
    pub fn invalidate(&self) {
        let fresh = read_store(self.store.as_ref());
        debug!(configured = fresh.is_some(), "Credential cache invalidated");
        *self.cached.write() = fresh;
    }

    pub fn open_settings(&self) {
        self.store.open_settings();
    }
}

fn read_store(store: &dyn CredentialStore) -> Option<Credentials> {
    store.load().filter(Credentials::is_complete)
}

/// Credentials taken from the `[credentials]` config section.
pub struct StaticCredentialStore {
    config: RwLock<CredentialsConfig>,
    settings_hint: String,
}

impl StaticCredentialStore {
    pub fn new(config: CredentialsConfig) -> Self {
        Self {
            config: RwLock::new(config),
            settings_hint: "the [credentials] section of the config file".to_string(),
        }
    }

    /// Where `open_settings` points the user.
    pub fn with_settings_hint(mut self, hint: impl Into<String>) -> Self {
        self.settings_hint = hint.into();
        self
    }

    /// Replace the stored values. Callers follow up with
    /// [`CredentialContext::invalidate`].
    pub fn update(&self, config: CredentialsConfig) {
        *self.config.write() = config;
    }
}

impl CredentialStore for StaticCredentialStore {
    fn load(&self) -> Option<Credentials> {
        let config = self.config.read();
        match (&config.api_token, &config.workspace) {
            (Some(token), Some(workspace)) => Some(Credentials::new(token, workspace)),
            _ => None,
        }
    }

    fn open_settings(&self) {
        info!("Set api_token and workspace in {}", self.settings_hint);
    }
}
