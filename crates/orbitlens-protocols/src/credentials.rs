//! Credential/settings collaborator.

use std::fmt;

/// API credentials for the contact-management workspace.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub workspace: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            workspace: workspace.into(),
        }
    }

    /// Both fields non-blank.
    pub fn is_complete(&self) -> bool {
        !self.api_token.trim().is_empty() && !self.workspace.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("workspace", &self.workspace)
            .finish()
    }
}

/// Where credentials live and how the user edits them.
pub trait CredentialStore: Send + Sync {
    /// Read stored credentials, `None` when nothing usable is stored.
    fn load(&self) -> Option<Credentials>;

    /// Open the settings surface (options page) so the user can fix them.
    fn open_settings(&self);
}
