//! GitLab API data types.

use serde::Deserialize;

use crate::milestone::{Milestone, MilestoneMap, MilestoneState};

/// GitLab project - fields we need from the search response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Project ID.
    pub id: u64,
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Namespace information. Error pseudo-entries omit it.
    #[serde(default)]
    pub namespace: GitLabNamespace,
}

/// GitLab namespace (group or user).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitLabNamespace {
    /// Namespace path (slug).
    pub path: String,
}

/// GitLab milestone as returned by the milestones endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabMilestone {
    /// Milestone ID, used by the reactivation endpoint.
    pub id: u64,
    /// Milestone title.
    pub title: String,
    /// Due date as `YYYY-MM-DD`; may be unset.
    pub due_date: Option<String>,
    /// Lifecycle state: "active" or "closed".
    pub state: Option<String>,
}

/// Fold fetched milestone records into a title-keyed map, stamping each with
/// the state it was fetched under. Duplicate titles keep the last record.
pub(super) fn milestone_map(
    records: impl IntoIterator<Item = GitLabMilestone>,
    state: MilestoneState,
) -> MilestoneMap {
    records
        .into_iter()
        .map(|record| {
            (
                record.title.clone(),
                Milestone {
                    title: record.title,
                    due_date: record.due_date.unwrap_or_default(),
                    id: Some(record.id),
                    number: None,
                    state: Some(state),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_project() {
        let json = r#"{"id": 42, "name": "widget", "namespace": {"path": "acme"}}"#;
        let project: GitLabProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 42);
        assert_eq!(project.name, "widget");
        assert_eq!(project.namespace.path, "acme");
    }

    #[test]
    fn test_deserialize_project_tolerates_missing_name() {
        let json = r#"{"id": 7, "namespace": {"path": "acme"}}"#;
        let project: GitLabProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "");
    }

    #[test]
    fn test_deserialize_project_tolerates_missing_namespace() {
        let json = r#"{"id": 0, "name": "message"}"#;
        let project: GitLabProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.namespace.path, "");
    }

    #[test]
    fn test_deserialize_milestone() {
        let json = r#"{"id": 9, "title": "2026-01", "due_date": "2026-01-31", "state": "active"}"#;
        let milestone: GitLabMilestone = serde_json::from_str(json).unwrap();
        assert_eq!(milestone.id, 9);
        assert_eq!(milestone.title, "2026-01");
        assert_eq!(milestone.due_date.as_deref(), Some("2026-01-31"));
    }

    #[test]
    fn test_milestone_map_stamps_state_and_keeps_id() {
        let records = vec![GitLabMilestone {
            id: 9,
            title: "2026-01".into(),
            due_date: Some("2026-01-31".into()),
            state: Some("closed".into()),
        }];
        let map = milestone_map(records, MilestoneState::Closed);
        let m = map.get("2026-01").unwrap();
        assert_eq!(m.id, Some(9));
        assert_eq!(m.state, Some(MilestoneState::Closed));
        assert_eq!(m.due_date, "2026-01-31");
    }

    #[test]
    fn test_milestone_map_missing_due_date_becomes_empty() {
        let records = vec![GitLabMilestone {
            id: 1,
            title: "backlog".into(),
            due_date: None,
            state: None,
        }];
        let map = milestone_map(records, MilestoneState::Active);
        assert_eq!(map.get("backlog").unwrap().due_date, "");
    }
}
