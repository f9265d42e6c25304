//! Background member-data collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::FetchError;
use crate::types::{MemberRecord, Platform};

/// Lookup request sent by a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDataRequest {
    pub username: String,
    pub platform: Platform,
}

impl MemberDataRequest {
    pub fn new(username: impl Into<String>, platform: Platform) -> Self {
        Self {
            username: username.into(),
            platform,
        }
    }
}

/// Lookup response. `status` is HTTP-like: 401 unauthenticated, 404 unknown member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDataResponse {
    pub success: bool,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<serde_json::Value>,
}

impl MemberDataResponse {
    pub fn found(member: MemberRecord) -> Self {
        Self {
            success: true,
            status: 200,
            member: Some(member),
            additional_data: None,
        }
    }

    pub fn failed(status: u16) -> Self {
        Self {
            success: false,
            status,
            member: None,
            additional_data: None,
        }
    }

    pub fn with_additional_data(mut self, data: serde_json::Value) -> Self {
        self.additional_data = Some(data);
        self
    }
}

/// Explicit per-call context; carries the credentials read at startup.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub credentials: Credentials,
}

impl FetchContext {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

/// Performs member lookups on behalf of widgets.
#[async_trait]
pub trait MemberDataSource: Send + Sync {
    async fn request_member_data(
        &self,
        ctx: &FetchContext,
        request: &MemberDataRequest,
    ) -> Result<MemberDataResponse, FetchError>;
}
