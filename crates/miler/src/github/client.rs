//! GitHub provider implementation.

use async_trait::async_trait;
use reqwest::Method;

use super::types::{milestone_map, CreateMilestone, GitHubMilestone, UpdateState};
use crate::http::{normalize_base_url, Auth, RestClient};
use crate::milestone::{DueDateFormat, MilestoneMap, MilestoneState};
use crate::provider::{MilestoneProvider, ProviderError, ProviderKind, Result};

/// Milestone client for a GitHub-style API.
pub struct GitHubProvider {
    /// API root, e.g. `https://api.github.com`.
    base_url: String,
    rest: RestClient,
}

impl GitHubProvider {
    /// Create a provider for the GitHub API at `base_url`.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let rest = RestClient::new(Auth::Token(token.to_string()))?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            rest,
        })
    }

    fn repo_url(&self, project_id: &str) -> String {
        format!("{}/repos/{project_id}", self.base_url)
    }
}

fn state_param(state: MilestoneState) -> &'static str {
    match state {
        MilestoneState::Active => "open",
        MilestoneState::Closed => "closed",
    }
}

#[async_trait]
impl MilestoneProvider for GitHubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn due_date_format(&self) -> DueDateFormat {
        DueDateFormat::Rfc3339
    }

    /// GitHub addresses repositories by `owner/name` path, so resolution just
    /// verifies the repository exists and returns that path.
    async fn resolve_project_id(&self, project: &str, namespace: &str) -> Result<String> {
        let path = format!("{namespace}/{project}");
        let url = self.repo_url(&path);
        tracing::debug!(%url, "resolving GitHub repository");

        let response = self.rest.get(&url).await?;
        if !response.status().is_success() {
            return Err(ProviderError::from_status(
                response.status(),
                format!("repository {path}"),
            ));
        }
        Ok(path)
    }

    async fn list_milestones(
        &self,
        project_id: &str,
        state: MilestoneState,
    ) -> Result<MilestoneMap> {
        let url = format!(
            "{}/milestones?state={}",
            self.repo_url(project_id),
            state_param(state)
        );
        let mut map = MilestoneMap::new();
        for page in self.rest.paginate(&url).await? {
            let records: Vec<GitHubMilestone> = serde_json::from_str(&page)?;
            map.extend(milestone_map(records, state));
        }
        Ok(map)
    }

    async fn create_milestones(&self, project_id: &str, milestones: &MilestoneMap) -> Result<()> {
        let url = format!("{}/milestones", self.repo_url(project_id));
        for milestone in milestones.values() {
            let due_on = (!milestone.due_date.is_empty()).then_some(milestone.due_date.as_str());
            let payload = CreateMilestone {
                title: &milestone.title,
                due_on,
            };
            let response = self
                .rest
                .request(Method::POST, &url)
                .json(&payload)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(ProviderError::from_status(
                    response.status(),
                    format!("create milestone {}", milestone.title),
                ));
            }
            tracing::debug!(title = %milestone.title, "created milestone");
        }
        Ok(())
    }

    async fn reactivate_milestones(
        &self,
        project_id: &str,
        milestones: &MilestoneMap,
    ) -> Result<MilestoneMap> {
        let mut reactivated = MilestoneMap::new();
        for milestone in milestones.values() {
            let number = milestone.number.ok_or_else(|| {
                ProviderError::api(format!(
                    "milestone {} has no number, cannot reactivate",
                    milestone.title
                ))
            })?;
            let url = format!("{}/milestones/{number}", self.repo_url(project_id));
            let response = self
                .rest
                .request(Method::PATCH, &url)
                .json(&UpdateState { state: "open" })
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(ProviderError::from_status(
                    response.status(),
                    format!("reactivate milestone {}", milestone.title),
                ));
            }
            let mut updated = milestone.clone();
            updated.state = Some(MilestoneState::Active);
            reactivated.insert(updated.title.clone(), updated);
            tracing::debug!(title = %milestone.title, "reactivated milestone");
        }
        Ok(reactivated)
    }
}
