//! Supported host platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Host platform a widget is injected into.
///
/// The string form is stable: it namespaces generated tag names
/// (`obe-github-button`) and is sent with member lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Gmail,
    Twitter,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Github,
        Platform::Gmail,
        Platform::Twitter,
        Platform::Linkedin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Github => "github",
            Platform::Gmail => "gmail",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Tag name of the slotted button element.
    pub fn button_tag(self) -> String {
        format!("obe-{}-button", self.as_str())
    }

    /// Tag name of the slotted additional-data element.
    pub fn additional_data_tag(self) -> String {
        format!("obe-{}-additional-data", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SiteError::UnknownPlatform(s.to_string()))
    }
}
