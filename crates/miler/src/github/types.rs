//! GitHub API data types.

use serde::{Deserialize, Serialize};

use crate::milestone::{Milestone, MilestoneMap, MilestoneState};

/// GitHub milestone as returned by the milestones endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubMilestone {
    /// Globally unique milestone ID.
    pub id: u64,
    /// Per-repository milestone number; the update endpoint is addressed by
    /// this, not by `id`.
    pub number: u64,
    /// Milestone title.
    pub title: String,
    /// Due timestamp as RFC 3339; may be unset.
    pub due_on: Option<String>,
    /// Lifecycle state: "open" or "closed".
    pub state: Option<String>,
}

/// Request body for milestone creation.
#[derive(Debug, Serialize)]
pub(super) struct CreateMilestone<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<&'a str>,
}

/// Request body for a state change on an existing milestone.
#[derive(Debug, Serialize)]
pub(super) struct UpdateState<'a> {
    pub state: &'a str,
}

/// Fold fetched milestone records into a title-keyed map, stamping each with
/// the state it was fetched under. Duplicate titles keep the last record.
pub(super) fn milestone_map(
    records: impl IntoIterator<Item = GitHubMilestone>,
    state: MilestoneState,
) -> MilestoneMap {
    records
        .into_iter()
        .map(|record| {
            (
                record.title.clone(),
                Milestone {
                    title: record.title,
                    due_date: record.due_on.unwrap_or_default(),
                    id: Some(record.id),
                    number: Some(record.number),
                    state: Some(state),
                },
            )
        })
        .collect()
}
