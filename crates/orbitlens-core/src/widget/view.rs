use std::fmt;

use chrono::{DateTime, Utc};
use orbitlens_protocols::{IdentitySource, MemberRecord, OrbitLevel, Organization};

use super::DisplayLimits;
use super::state::{MemberDataState, WidgetPhase, WidgetState};

/// What a widget shows for its current state.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Idle,
    Loading,
    /// Credentials missing or rejected; offers to open settings.
    AuthError,
    OtherError,
    NotAMember,
    Member(MemberView),
}

impl WidgetView {
    pub fn build(state: &WidgetState, limits: DisplayLimits) -> Self {
        match state.phase() {
            WidgetPhase::Idle => WidgetView::Idle,
            WidgetPhase::Loading => WidgetView::Loading,
            WidgetPhase::AuthError => WidgetView::AuthError,
            WidgetPhase::NotAMember => WidgetView::NotAMember,
            WidgetPhase::OtherError => WidgetView::OtherError,
            WidgetPhase::Member => match &state.data {
                Some(MemberDataState::Member(member)) => WidgetView::Member(MemberView::build(
                    member,
                    limits,
                    state.show_all_tags,
                    state.show_all_identities,
                )),
                _ => WidgetView::OtherError,
            },
        }
    }

    pub fn phase(&self) -> WidgetPhase {
        match self {
            WidgetView::Idle => WidgetPhase::Idle,
            WidgetView::Loading => WidgetPhase::Loading,
            WidgetView::AuthError => WidgetPhase::AuthError,
            WidgetView::OtherError => WidgetPhase::OtherError,
            WidgetView::NotAMember => WidgetPhase::NotAMember,
            WidgetView::Member(_) => WidgetPhase::Member,
        }
    }

    /// Status line for the non-member states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            WidgetView::Idle | WidgetView::Member(_) => None,
            WidgetView::Loading => Some("Loading member data..."),
            WidgetView::AuthError => {
                Some("Your API token or workspace is missing or invalid.")
            }
            WidgetView::OtherError => Some("Something went wrong. Please try again later."),
            WidgetView::NotAMember => Some("This person is not a member of your workspace."),
        }
    }
}

/// Summary badge shown under the member's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pill {
    Teammate,
    OrbitLevel(u8),
    LastActive(DateTime<Utc>),
}

impl Pill {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pill::Teammate => f.write_str("Teammate"),
            Pill::OrbitLevel(level) => write!(f, "Orbit Level: {}", level),
            Pill::LastActive(at) => write!(f, "Last active: {}", at.format("%b %-d, %Y")),
        }
    }
}

/// One identity, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBadge {
    pub source: IdentitySource,
    pub handle: String,
    pub profile_url: Option<String>,
}

/// A list cut to a display limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<T> {
    pub items: Vec<T>,
    /// Items past the limit that are not shown.
    pub hidden: usize,
}

impl<T> Truncated<T> {
    pub fn new(mut all: Vec<T>, limit: usize, expanded: bool) -> Self {
        let total = all.len();
        if expanded || total <= limit {
            return Self {
                items: all,
                hidden: 0,
            };
        }
        all.truncate(limit);
        Self {
            items: all,
            hidden: total - limit,
        }
    }

    /// Text of the expand control; `None` once everything is shown.
    pub fn toggle_label(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("{} more", self.hidden))
    }
}

/// Member card content.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    pub name: String,
    pub job_title: Option<String>,
    pub organization: Option<Organization>,
    pub pills: Vec<Pill>,
    pub identities: Truncated<IdentityBadge>,
    pub tags: Truncated<String>,
}

impl MemberView {
    pub fn build(
        member: &MemberRecord,
        limits: DisplayLimits,
        show_all_tags: bool,
        show_all_identities: bool,
    ) -> Self {
        let mut pills = Vec::new();
        match member.orbit_level {
            Some(OrbitLevel::Teammate) => pills.push(Pill::Teammate),
            Some(OrbitLevel::Level(level)) => pills.push(Pill::OrbitLevel(level)),
            None => {}
        }
        if let Some(at) = member.last_activity_at {
            pills.push(Pill::LastActive(at));
        }

        let badges = member
            .identities
            .iter()
            .filter_map(|identity| {
                Some(IdentityBadge {
                    source: identity.source,
                    handle: identity.handle()?.to_string(),
                    profile_url: identity.profile_url.clone(),
                })
            })
            .collect();

        Self {
            name: member.name.clone(),
            job_title: member.job_title.clone(),
            organization: member.organization.clone(),
            pills,
            identities: Truncated::new(badges, limits.identity_limit, show_all_identities),
            tags: Truncated::new(member.tags.clone(), limits.tag_limit, show_all_tags),
        }
    }
}
