//! Member record returned by the contact-management API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Enrichment data about one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// `None` when the API omitted the field; see [`OrbitLevel`] for `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_orbit_level",
        serialize_with = "serialize_orbit_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub orbit_level: Option<OrbitLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub identities: Vec<Identity>,
}

impl MemberRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_title: None,
            organization: None,
            orbit_level: None,
            last_activity_at: None,
            tags: Vec::new(),
            identities: Vec::new(),
        }
    }
}

/// A member's orbit level. An explicit `null` from the API means the member
/// is a teammate, which is not the same as an unknown level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitLevel {
    Teammate,
    Level(u8),
}

fn deserialize_orbit_level<'de, D>(deserializer: D) -> Result<Option<OrbitLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    // Only reached when the key is present, so `null` means teammate.
    let level = Option::<u8>::deserialize(deserializer)?;
    Ok(Some(match level {
        Some(n) => OrbitLevel::Level(n),
        None => OrbitLevel::Teammate,
    }))
}

fn serialize_orbit_level<S>(level: &Option<OrbitLevel>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match level {
        Some(OrbitLevel::Level(n)) => serializer.serialize_some(n),
        Some(OrbitLevel::Teammate) | None => serializer.serialize_none(),
    }
}

/// Organization the member belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_stage: Option<String>,
}

/// Where an identity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    Email,
    Github,
    Discourse,
    StackOverflow,
    Twitter,
    Linkedin,
    Discord,
    Reddit,
    Slack,
    Youtube,
    #[serde(other)]
    Other,
}

impl IdentitySource {
    pub fn label(self) -> &'static str {
        match self {
            IdentitySource::Email => "Email",
            IdentitySource::Github => "GitHub",
            IdentitySource::Discourse => "Discourse",
            IdentitySource::StackOverflow => "Stack Overflow",
            IdentitySource::Twitter => "Twitter",
            IdentitySource::Linkedin => "LinkedIn",
            IdentitySource::Discord => "Discord",
            IdentitySource::Reddit => "Reddit",
            IdentitySource::Slack => "Slack",
            IdentitySource::Youtube => "YouTube",
            IdentitySource::Other => "Other",
        }
    }
}

/// One of the member's accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub source: IdentitySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl Identity {
    /// Username if known, otherwise the email address.
    pub fn handle(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}
