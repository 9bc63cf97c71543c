//! GitLab provider implementation.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use super::types::{milestone_map, GitLabMilestone, GitLabProject};
use crate::http::{normalize_base_url, Auth, RestClient};
use crate::milestone::{DueDateFormat, MilestoneMap, MilestoneState};
use crate::provider::{MilestoneProvider, ProviderError, ProviderKind, Result};

/// GitLab's error envelope: a JSON object with a `message` key where an array
/// of projects was expected.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: serde_json::Value,
}

/// Milestone client for a GitLab instance.
pub struct GitLabProvider {
    /// API root, e.g. `https://gitlab.com/api/v4`.
    api_base: String,
    rest: RestClient,
}

impl GitLabProvider {
    /// Create a provider for the GitLab instance at `base_url`.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let rest = RestClient::new(Auth::PrivateToken(token.to_string()))?;
        Ok(Self {
            api_base: format!("{}/api/v4", normalize_base_url(base_url)),
            rest,
        })
    }

    fn milestones_url(&self, project_id: &str) -> String {
        format!("{}/projects/{project_id}/milestones", self.api_base)
    }
}

fn state_param(state: MilestoneState) -> &'static str {
    match state {
        MilestoneState::Active => "active",
        MilestoneState::Closed => "closed",
    }
}

#[async_trait]
impl MilestoneProvider for GitLabProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitLab
    }

    fn due_date_format(&self) -> DueDateFormat {
        DueDateFormat::Date
    }

    /// Search projects by name and match on both name and namespace path,
    /// since a search can span many namespaces.
    async fn resolve_project_id(&self, project: &str, namespace: &str) -> Result<String> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search", project)
            .finish();
        let url = format!("{}/projects/?{query}", self.api_base);
        tracing::debug!(%url, "resolving GitLab project");

        for page in self.rest.paginate(&url).await? {
            let projects: Vec<GitLabProject> = match serde_json::from_str(&page) {
                Ok(projects) => projects,
                Err(err) => {
                    // A JSON object here is GitLab reporting an error, most
                    // commonly a rejected token.
                    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&page) {
                        return Err(ProviderError::api(envelope.message.to_string()));
                    }
                    return Err(err.into());
                }
            };
            for candidate in projects {
                // GitLab sometimes reports errors as a pseudo-entry named
                // "message" inside an otherwise well-formed listing.
                if candidate.name == "message" {
                    return Err(ProviderError::api("project search returned an error entry"));
                }
                if candidate.name == project && candidate.namespace.path == namespace {
                    return Ok(candidate.id.to_string());
                }
            }
        }
        Err(ProviderError::not_found(format!(
            "project {namespace}/{project}"
        )))
    }

    async fn list_milestones(
        &self,
        project_id: &str,
        state: MilestoneState,
    ) -> Result<MilestoneMap> {
        let url = format!(
            "{}?state={}",
            self.milestones_url(project_id),
            state_param(state)
        );
        let mut map = MilestoneMap::new();
        for page in self.rest.paginate(&url).await? {
            let records: Vec<GitLabMilestone> = serde_json::from_str(&page)?;
            map.extend(milestone_map(records, state));
        }
        Ok(map)
    }

    async fn create_milestones(&self, project_id: &str, milestones: &MilestoneMap) -> Result<()> {
        let url = self.milestones_url(project_id);
        for milestone in milestones.values() {
            let response = self
                .rest
                .request(Method::POST, &url)
                .form(&[
                    ("title", milestone.title.as_str()),
                    ("dueDate", milestone.due_date.as_str()),
                ])
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
            let id = milestone.id.ok_or_else(|| {
                ProviderError::api(format!(
                    "milestone {} has no id, cannot reactivate",
                    milestone.title
                ))
            })?;
            let url = format!(
                "{}/{id}?state_event=activate",
                self.milestones_url(project_id)
            );
            let response = self.rest.request(Method::PUT, &url).send().await?;
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
