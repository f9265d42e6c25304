//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Site ids known to the site registry.
pub const KNOWN_SITES: [&str; 4] = ["github", "gmail", "twitter", "linkedin"];

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub sites: SitesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Widget display limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Tags shown before the "n more" toggle.
    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,

    /// Identity badges shown before the "n more" toggle.
    #[serde(default = "default_identity_limit")]
    pub identity_limit: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tag_limit: default_tag_limit(),
            identity_limit: default_identity_limit(),
        }
    }
}

fn default_tag_limit() -> usize {
    3
}

fn default_identity_limit() -> usize {
    5
}

/// Landmark watcher for sites without navigation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// How long to wait for the landmark before staying inert.
    #[serde(default = "default_landmark_timeout_ms")]
    pub landmark_timeout_ms: u64,
}

impl WatcherConfig {
    pub fn landmark_timeout(&self) -> Duration {
        Duration::from_millis(self.landmark_timeout_ms)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            landmark_timeout_ms: default_landmark_timeout_ms(),
        }
    }
}

fn default_landmark_timeout_ms() -> u64 {
    10_000
}

/// Contact-management API credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default)]
    pub workspace: Option<String>,
}

impl CredentialsConfig {
    pub fn is_configured(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.api_token) && filled(&self.workspace)
    }
}

/// Which site integrations run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitesConfig {
    /// Site ids to skip, e.g. `["linkedin"]`.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl SitesConfig {
    pub fn is_enabled(&self, site: &str) -> bool {
        !self.disabled.iter().any(|d| d.eq_ignore_ascii_case(site))
    }
}

/// Logging output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rolling log files; console only when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.widget.tag_limit, 3);
        assert_eq!(config.widget.identity_limit, 5);
        assert_eq!(config.watcher.landmark_timeout(), Duration::from_secs(10));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.dir.is_none());
        assert!(!config.credentials.is_configured());
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let mut creds = CredentialsConfig {
            api_token: Some("tok".to_string()),
            workspace: None,
        };
        assert!(!creds.is_configured());
        creds.workspace = Some("  ".to_string());
        assert!(!creds.is_configured());
        creds.workspace = Some("acme".to_string());
        assert!(creds.is_configured());
    }

    #[test]
    fn test_sites_enabled_case_insensitive() {
        let sites = SitesConfig {
            disabled: vec!["LinkedIn".to_string()],
        };
        assert!(!sites.is_enabled("linkedin"));
        assert!(sites.is_enabled("github"));
    }
}
