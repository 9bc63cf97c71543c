//! Synchronization workflows built on top of a [`MilestoneProvider`].

use crate::milestone::{MilestoneMap, MilestoneState};
use crate::provider::{MilestoneProvider, Result};
use crate::reconcile::{creation_set, reactivation_set};

/// Create every desired milestone the project does not already have active.
///
/// Returns the set that was created, empty when the project was already up to
/// date.
pub async fn create_missing_milestones(
    provider: &dyn MilestoneProvider,
    project_id: &str,
    desired: &MilestoneMap,
) -> Result<MilestoneMap> {
    let active = provider
        .list_milestones(project_id, MilestoneState::Active)
        .await?;
    let missing = creation_set(desired, &active);
    if missing.is_empty() {
        tracing::info!("No milestone creation needed");
        return Ok(missing);
    }

    tracing::info!("New milestones:");
    for milestone in missing.values() {
        tracing::info!("Title: {} - Due Date: {}", milestone.title, milestone.due_date);
    }
    provider.create_milestones(project_id, &missing).await?;
    Ok(missing)
}

/// Reopen closed milestones whose titles are back in the desired set.
///
/// Returns the reactivated milestones, empty when nothing needed reopening.
pub async fn reactivate_closed_milestones(
    provider: &dyn MilestoneProvider,
    project_id: &str,
    desired: &MilestoneMap,
) -> Result<MilestoneMap> {
    let closed = provider
        .list_milestones(project_id, MilestoneState::Closed)
        .await?;
    let stale = reactivation_set(desired, &closed);
    if stale.is_empty() {
        return Ok(stale);
    }
    provider.reactivate_milestones(project_id, &stale).await
}
