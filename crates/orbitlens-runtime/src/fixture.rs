//! Member-data source answering from a JSON fixture.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use orbitlens_protocols::{
    FetchContext, FetchError, MemberDataRequest, MemberDataResponse, MemberDataSource,
};
use tracing::debug;

use crate::error::FixtureError;

/// Responses keyed by `"<platform>:<username>"` or bare `"<username>"`.
/// Unknown people get a 404.
///
/// ```json
/// {
///   "github:octocat": { "success": true, "status": 200, "member": { "name": "Mona" } },
///   "grace": { "success": false, "status": 401 }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureMemberSource {
    responses: HashMap<String, MemberDataResponse>,
    latency: Option<Duration>,
}

impl FixtureMemberSource {
    pub fn new(responses: HashMap<String, MemberDataResponse>) -> Self {
        Self {
            responses,
            latency: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Delay every answer, to exercise in-flight states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, response: MemberDataResponse) {
        self.responses.insert(key.into(), response);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    fn lookup(&self, request: &MemberDataRequest) -> MemberDataResponse {
        let scoped = format!("{}:{}", request.platform, request.username);
        self.responses
            .get(&scoped)
            .or_else(|| self.responses.get(&request.username))
            .cloned()
            .unwrap_or_else(|| MemberDataResponse::failed(404))
    }
}

#[async_trait]
impl MemberDataSource for FixtureMemberSource {
    async fn request_member_data(
        &self,
        ctx: &FetchContext,
        request: &MemberDataRequest,
    ) -> Result<MemberDataResponse, FetchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let response = self.lookup(request);
        debug!(
            username = %request.username,
            platform = %request.platform,
            workspace = %ctx.credentials.workspace,
            status = response.status,
            "Fixture lookup"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitlens_protocols::{Credentials, Platform};
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "github:octocat": {"success": true, "status": 200, "member": {"name": "Mona", "orbitLevel": 1}},
        "octocat": {"success": false, "status": 500},
        "grace": {"success": false, "status": 401}
    }"#;

    fn ctx() -> FetchContext {
        FetchContext::new(Credentials::new("tok", "acme"))
    }

    #[tokio::test]
    async fn test_platform_scoped_key_wins() {
        let source = FixtureMemberSource::from_json(FIXTURE).unwrap();
        let response = source
            .request_member_data(&ctx(), &MemberDataRequest::new("octocat", Platform::Github))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.member.unwrap().name, "Mona");
    }

    #[tokio::test]
    async fn test_bare_username_fallback() {
        let source = FixtureMemberSource::from_json(FIXTURE).unwrap();
        let response = source
            .request_member_data(&ctx(), &MemberDataRequest::new("octocat", Platform::Twitter))
            .await
            .unwrap();
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_unknown_is_not_found() {
        let source = FixtureMemberSource::default();
        let response = source
            .request_member_data(&ctx(), &MemberDataRequest::new("nobody", Platform::Gmail))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.success);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let source = FixtureMemberSource::load(file.path()).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FixtureMemberSource::load(Path::new("/nonexistent/fixture.json"));
        assert!(matches!(result, Err(FixtureError::Io { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = FixtureMemberSource::from_json("{not json");
        assert!(matches!(result, Err(FixtureError::Parse(_))));
    }
}
