//! Pure set logic for comparing desired and remote milestone maps.

use crate::milestone::{MilestoneMap, MilestoneState};

/// Desired milestones whose titles have no active counterpart on the remote.
///
/// Entries keep their locally generated due dates; remote ids never enter the
/// result.
pub fn creation_set(desired: &MilestoneMap, remote_active: &MilestoneMap) -> MilestoneMap {
    desired
        .iter()
        .filter(|(title, _)| !remote_active.contains_key(*title))
        .map(|(title, milestone)| (title.clone(), milestone.clone()))
        .collect()
}

/// Remote closed milestones whose titles appear in the desired set.
///
/// Entries are the remote records (with ids and numbers intact), since those
/// identities address the reopening endpoints.
pub fn reactivation_set(desired: &MilestoneMap, remote_closed: &MilestoneMap) -> MilestoneMap {
    remote_closed
        .iter()
        .filter(|(title, milestone)| {
            desired.contains_key(*title) && milestone.state == Some(MilestoneState::Closed)
        })
        .map(|(title, milestone)| (title.clone(), milestone.clone()))
        .collect()
}
