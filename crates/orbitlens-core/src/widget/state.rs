use std::fmt;

use orbitlens_protocols::{MemberDataResponse, MemberRecord};
use serde::Serialize;

/// Whether the member lookup has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
}

/// Outcome of a finished lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDataState {
    AuthError,
    OtherError,
    NotAMember,
    Member(Box<MemberRecord>),
}

impl MemberDataState {
    /// 401 is an auth problem, 404 an unknown person, a successful response
    /// with a member is a hit. Everything else is a generic error.
    pub fn from_response(response: MemberDataResponse) -> Self {
        match response.status {
            401 => MemberDataState::AuthError,
            404 => MemberDataState::NotAMember,
            _ if response.success => match response.member {
                Some(member) => MemberDataState::Member(Box::new(member)),
                None => MemberDataState::OtherError,
            },
            _ => MemberDataState::OtherError,
        }
    }
}

/// Single-value summary of a widget's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetPhase {
    Idle,
    Loading,
    AuthError,
    OtherError,
    NotAMember,
    Member,
}

impl WidgetPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetPhase::Idle => "idle",
            WidgetPhase::Loading => "loading",
            WidgetPhase::AuthError => "authError",
            WidgetPhase::OtherError => "otherError",
            WidgetPhase::NotAMember => "notAMember",
            WidgetPhase::Member => "member",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, WidgetPhase::Idle | WidgetPhase::Loading)
    }
}

impl fmt::Display for WidgetPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of one widget instance.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub load: LoadState,
    pub data: Option<MemberDataState>,
    pub additional_data: Option<serde_json::Value>,
    pub dropdown_open: bool,
    pub show_all_tags: bool,
    pub show_all_identities: bool,
}

impl WidgetState {
    pub fn phase(&self) -> WidgetPhase {
        match (self.load, &self.data) {
            (LoadState::NotLoaded, _) => WidgetPhase::Idle,
            (LoadState::Loading, _) => WidgetPhase::Loading,
            (LoadState::Loaded, Some(MemberDataState::AuthError)) => WidgetPhase::AuthError,
            (LoadState::Loaded, Some(MemberDataState::NotAMember)) => WidgetPhase::NotAMember,
            (LoadState::Loaded, Some(MemberDataState::Member(_))) => WidgetPhase::Member,
            (LoadState::Loaded, Some(MemberDataState::OtherError) | None) => {
                WidgetPhase::OtherError
            }
        }
    }

    /// Record a finished lookup. Terminal states are never overwritten.
    pub(crate) fn finish(&mut self, outcome: MemberDataState) -> bool {
        if self.load == LoadState::Loaded {
            return false;
        }
        self.load = LoadState::Loaded;
        self.data = Some(outcome);
        true
    }
}
